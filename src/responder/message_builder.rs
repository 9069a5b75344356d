use std::fmt::Write;

use url::Url;

const SEPARATOR: &str = "⋅";

/// A comment ready to be posted: `body` is what GitHub renders, `plain` is what we log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub body: String,
    pub plain: String,
}

#[derive(Default)]
pub struct MessageBuilder {
    pub(crate) html: String,
    pub(crate) plain: String,
    pub(crate) urls: Vec<Url>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn build(mut self) -> Message {
        // Append link targets to plain text message, in order of appearance
        for url in &self.urls {
            write!(self.plain, " {} {}", SEPARATOR, url).unwrap();
        }

        Message {
            body: self.html,
            plain: self.plain,
        }
    }

    pub fn line_break(&mut self) {
        self.html.push_str("<br/>");
        self.plain.push('\n');
    }

    pub fn link(&mut self, text: &str, href: &Url) {
        // NOTE: the URL is bonus information in plain text mode, it only shows up at the end of the
        // message
        self.plain.push_str(text);
        self.urls.push(href.clone());

        self.html.push_str(r#"<a href=""#);
        self.html.push_str(href.as_str());
        self.html.push_str(r#"">"#);
        write!(self.html, "{}", Escaped(text)).unwrap();
        self.html.push_str("</a>");
    }
}

/// Escapes characters that have a special meaning in HTML. Shamelessly adapted from
/// rustdoc/html/escape.rs
struct Escaped<'a>(&'a str);

impl std::fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Escaped(s) = *self;
        let mut last = 0;
        for (i, c) in s.char_indices() {
            let escaped = match c {
                '>' => "&gt;",
                '<' => "&lt;",
                '&' => "&amp;",
                '\'' => "&#39;",
                '"' => "&quot;",
                _ => continue,
            };

            f.write_str(&s[last..i])?;
            f.write_str(escaped)?;
            last = i + 1;
        }

        if last < s.len() {
            f.write_str(&s[last..])?;
        }

        Ok(())
    }
}

impl std::fmt::Write for MessageBuilder {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.plain.push_str(s);
        write!(self.html, "{}", Escaped(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escape() {
        let mut msgbld = MessageBuilder::new();

        write!(&mut msgbld, "These should be escaped: < > & \" '").unwrap();

        assert_eq!(
            msgbld.html,
            "These should be escaped: &lt; &gt; &amp; &quot; &#39;"
        );
        assert_eq!(msgbld.plain, "These should be escaped: < > & \" '");
    }

    #[test]
    fn test_append_urls() {
        let mut msgbld = MessageBuilder::new();

        write!(msgbld, "see").unwrap();
        msgbld.line_break();
        msgbld.link("one", &Url::parse("https://prologin.org").unwrap());
        write!(msgbld, " & ").unwrap();
        msgbld.link("<two>", &Url::parse("https://example.com/a?b=c").unwrap());

        let message = msgbld.build();

        assert_eq!(
            message.body,
            r#"see<br/><a href="https://prologin.org/">one</a> &amp; <a href="https://example.com/a?b=c">&lt;two&gt;</a>"#
        );
        assert_eq!(
            message.plain,
            "see\none & <two> ⋅ https://prologin.org/ ⋅ https://example.com/a?b=c"
        );
    }
}
