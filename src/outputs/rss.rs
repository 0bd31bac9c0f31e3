//! RSS 2.0 document rendering.
//!
//! Text elements escape exactly `&`, `<` and `>`. Descriptions go into CDATA
//! so category labels pass through verbatim, markup-like text included.
//!
//! # Output Structure
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>..</title> <link>..</link> <description>..</description>
//!     <lastBuildDate>..</lastBuildDate> <docs>..</docs> <generator>..</generator>
//!     <item>
//!       <title>..</title> <link>..</link>
//!       <guid isPermaLink="false">..</guid> <pubDate>..</pubDate>
//!       <description><![CDATA[..]]></description>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use crate::dates::rfc2822;
use crate::error::{Error, Result};
use crate::models::{CandidateItem, FeedChannelMeta};
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, instrument};

pub const GENERATOR: &str = "uksc-feeds";
const RSS_DOCS: &str = "https://validator.w3.org/feed/docs/rss2.html";

fn render_err(e: impl std::fmt::Display) -> Error {
    Error::Render(e.to_string())
}

fn write_text_element(w: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    write_text_element_with(w, BytesStart::new(name), text)
}

fn write_text_element_with(w: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> Result<()> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    w.write_event(Event::Start(start)).map_err(render_err)?;
    w.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(render_err)?;
    w.write_event(Event::End(end)).map_err(render_err)?;
    Ok(())
}

/// Write `text` as CDATA, splitting on `]]>` so it cannot close the section early.
fn write_cdata_element(w: &mut Writer<Vec<u8>>, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))
        .map_err(render_err)?;
    for chunk in cdata_chunks(text) {
        w.write_event(Event::CData(BytesCData::new(chunk)))
            .map_err(render_err)?;
    }
    w.write_event(Event::End(BytesEnd::new(name)))
        .map_err(render_err)?;
    Ok(())
}

/// `a]]>b` becomes `["a]]", ">b"]`; text without `]]>` is a single chunk.
fn cdata_chunks(text: &str) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;
    while let Some(pos) = rest.find("]]>") {
        chunks.push(&rest[..pos + 2]);
        rest = &rest[pos + 2..];
    }
    chunks.push(rest);
    chunks
}

fn write_item(w: &mut Writer<Vec<u8>>, item: &CandidateItem) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("item")))
        .map_err(render_err)?;
    write_text_element(w, "title", &item.title)?;
    write_text_element(w, "link", &item.link)?;
    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "false"));
    write_text_element_with(w, guid, &item.identity)?;
    write_text_element(w, "pubDate", &rfc2822(item.published_at))?;
    write_cdata_element(w, "description", &item.description)?;
    w.write_event(Event::End(BytesEnd::new("item")))
        .map_err(render_err)?;
    Ok(())
}

/// Render `items`, in the given order, as a complete RSS 2.0 document.
///
/// # Errors
///
/// Returns [`Error::Render`] if the XML writer fails, which only happens on
/// invalid UTF-8 in its own output.
#[instrument(level = "info", skip_all, fields(channel = %meta.title, items = items.len()))]
pub fn assemble(meta: &FeedChannelMeta, items: &[CandidateItem]) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_err)?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    writer.write_event(Event::Start(rss)).map_err(render_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(render_err)?;

    write_text_element(&mut writer, "title", &meta.title)?;
    write_text_element(&mut writer, "link", &meta.link)?;
    write_text_element(&mut writer, "description", &meta.description)?;
    write_text_element(&mut writer, "lastBuildDate", &rfc2822(meta.generated_at))?;
    write_text_element(&mut writer, "docs", RSS_DOCS)?;
    write_text_element(&mut writer, "generator", GENERATOR)?;

    for item in items {
        write_item(&mut writer, item)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(render_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(render_err)?;

    let xml = String::from_utf8(writer.into_inner()).map_err(render_err)?;
    debug!(bytes = xml.len(), "Rendered feed");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::identity;
    use chrono::{TimeZone, Utc};

    fn meta() -> FeedChannelMeta {
        FeedChannelMeta {
            title: "UK Supreme Court – Latest judgments".to_string(),
            link: "https://www.supremecourt.uk/news/latest-judgments".to_string(),
            description: "Auto-generated RSS of the Supreme Court's 'Latest judgments' updates."
                .to_string(),
            generated_at: Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap(),
        }
    }

    fn item(title: &str, link: &str, description: &str) -> CandidateItem {
        CandidateItem {
            title: title.to_string(),
            link: link.to_string(),
            raw_date_text: "15 January 2026".to_string(),
            published_at: Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap(),
            description: description.to_string(),
            identity: identity(link, title, "15 January 2026"),
        }
    }

    #[test]
    fn test_single_item_document() {
        let miller = item(
            "R (Miller) v Secretary of State",
            "https://www.supremecourt.uk/cases/miller",
            "UKSC",
        );
        let xml = assemble(&meta(), std::slice::from_ref(&miller)).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<rss version="2.0">"#));
        assert_eq!(xml.matches("<item>").count(), 1);
        assert!(xml.contains("<title>R (Miller) v Secretary of State</title>"));
        assert!(xml.contains("<link>https://www.supremecourt.uk/cases/miller</link>"));
        assert!(xml.contains(&format!(
            r#"<guid isPermaLink="false">{}</guid>"#,
            miller.identity
        )));
        assert_eq!(miller.identity.len(), 64);
        assert!(xml.contains("<pubDate>Thu, 15 Jan 2026 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("<description><![CDATA[UKSC]]></description>"));
        assert!(xml.trim_end().ends_with("</rss>"));
    }

    #[test]
    fn test_channel_metadata() {
        let xml = assemble(&meta(), &[]).unwrap();
        assert!(xml.contains("<title>UK Supreme Court – Latest judgments</title>"));
        assert!(xml.contains("<link>https://www.supremecourt.uk/news/latest-judgments</link>"));
        assert!(xml.contains("<lastBuildDate>Fri, 16 Oct 2026 09:30:00 +0000</lastBuildDate>"));
        assert!(xml.contains("<generator>uksc-feeds</generator>"));
        assert!(xml.contains("<docs>https://validator.w3.org/feed/docs/rss2.html</docs>"));
        // Apostrophes are left alone; only & < > are escaped
        assert!(xml.contains("Supreme Court's 'Latest judgments' updates."));
        assert_eq!(xml.matches("<item>").count(), 0);
    }

    #[test]
    fn test_title_markup_is_escaped() {
        let risky = item(
            "Smith & Sons <Holdings> v HMRC",
            "https://www.supremecourt.uk/cases?id=1&lang=en",
            "UKSC",
        );
        let xml = assemble(&meta(), &[risky]).unwrap();
        assert!(xml.contains("<title>Smith &amp; Sons &lt;Holdings&gt; v HMRC</title>"));
        assert!(xml.contains("<link>https://www.supremecourt.uk/cases?id=1&amp;lang=en</link>"));
        assert!(!xml.contains("<Holdings>"));
    }

    #[test]
    fn test_description_passes_through_cdata() {
        let rich = item("X", "https://www.supremecourt.uk/x", "<b>Tax</b> & Revenue");
        let xml = assemble(&meta(), &[rich]).unwrap();
        assert!(xml.contains("<description><![CDATA[<b>Tax</b> & Revenue]]></description>"));
    }

    #[test]
    fn test_description_containing_cdata_terminator() {
        let nasty = item("X", "https://www.supremecourt.uk/x", "a]]>b");
        let xml = assemble(&meta(), &[nasty]).unwrap();
        assert!(xml.contains("<description><![CDATA[a]]]]><![CDATA[>b]]></description>"));
    }

    #[test]
    fn test_empty_title_renders_empty_element() {
        let blank = item("", "", "UKSC");
        let xml = assemble(&meta(), &[blank]).unwrap();
        assert!(xml.contains("<title></title>"));
        assert!(xml.contains("<link></link>"));
    }

    #[test]
    fn test_items_keep_given_order() {
        let first = item("First", "https://www.supremecourt.uk/1", "UKSC");
        let second = item("Second", "https://www.supremecourt.uk/2", "UKSC");
        let xml = assemble(&meta(), &[first, second]).unwrap();
        let a = xml.find("<title>First</title>").unwrap();
        let b = xml.find("<title>Second</title>").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_cdata_chunks() {
        assert_eq!(cdata_chunks("plain"), vec!["plain"]);
        assert_eq!(cdata_chunks(""), vec![""]);
        assert_eq!(cdata_chunks("a]]>b]]>c"), vec!["a]]", ">b]]", ">c"]);
    }
}
