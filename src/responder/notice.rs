use std::fmt::Write;

use url::Url;

use crate::responder::message_builder::{Message, MessageBuilder};

const COMMANDS_README: &str =
    "https://github.com/paritytech/polkadot-sdk/blob/master/docs/contributor/commands-readme.md";
const FORUM_ANNOUNCEMENT: &str =
    "https://forum.parity.io/t/streamlining-weight-generation-and-more-the-new-cmd-bot/2411";

/// The reply posted under every `bot ...` command.
pub fn migration_notice() -> anyhow::Result<Message> {
    let readme = Url::parse(COMMANDS_README)?;
    let forum = Url::parse(FORUM_ANNOUNCEMENT)?;

    let mut message = MessageBuilder::new();
    write!(message, "We have migrated the command bot to GHA")?;
    message.line_break();
    message.line_break();
    write!(message, "Please, see the new usage instructions ")?;
    message.link("here", &readme);
    write!(message, " or ")?;
    message.link("here", &forum);
    write!(message, ". Soon the old commands will be disabled.")?;

    Ok(message.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_body() {
        let notice = migration_notice().unwrap();

        assert_eq!(
            notice.body,
            "We have migrated the command bot to GHA<br/><br/>Please, see the new usage \
             instructions <a href=\"https://github.com/paritytech/polkadot-sdk/blob/master/docs/contributor/commands-readme.md\">here</a> \
             or <a href=\"https://forum.parity.io/t/streamlining-weight-generation-and-more-the-new-cmd-bot/2411\">here</a>. \
             Soon the old commands will be disabled."
        );
    }

    #[test]
    fn notice_plain_text() {
        let notice = migration_notice().unwrap();

        assert!(notice
            .plain
            .starts_with("We have migrated the command bot to GHA\n\nPlease, see the new usage instructions here or here."));
        assert!(notice.plain.ends_with(&format!(
            " ⋅ {} ⋅ {}",
            COMMANDS_README, FORUM_ANNOUNCEMENT
        )));
    }
}
