// src/ingest/providers/rss.rs
//! Feed document parsing for RSS 2.0, RSS 1.0 (RDF) and Atom.
//!
//! The root element decides the dialect; each dialect is deserialized with
//! `quick-xml`'s serde support and flattened into [`RawFeed`].

use anyhow::{bail, Context, Result};
use metrics::histogram;
use quick_xml::{de::from_str, events::Event, Reader};
use serde::Deserialize;

use crate::ingest::types::{RawEntry, RawFeed};

// ---- RSS 2.0 ----

#[derive(Debug, Deserialize)]
struct Rss {
    channel: RssChannel,
}

#[derive(Debug, Deserialize)]
struct RssChannel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

// Element names are matched on their local part, so `<dc:date>` arrives as
// `date`, `<atom:updated>` as `updated` and `<atom:link/>` as another `link`.
#[derive(Debug, Deserialize)]
struct RssItem {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<RssLink>,
    description: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    #[serde(rename = "date")]
    dc_date: Option<String>,
    #[serde(rename = "updated")]
    atom_updated: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RssLink {
    #[serde(rename = "$text", default)]
    text: Option<String>,
    #[serde(rename = "@href", default)]
    href: Option<String>,
}

impl RssItem {
    /// First `<link>` with text, else the first `href` seen.
    fn link(&self) -> Option<String> {
        let non_empty = |s: &Option<String>| {
            s.as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
        };
        self.links
            .iter()
            .find_map(|l| non_empty(&l.text))
            .or_else(|| self.links.iter().find_map(|l| non_empty(&l.href)))
    }
}

impl From<RssItem> for RawEntry {
    fn from(it: RssItem) -> Self {
        let link = it.link();
        RawEntry {
            title: it.title,
            link,
            summary: it.description,
            published: it.pub_date,
            updated: it.dc_date.or(it.atom_updated),
        }
    }
}

// ---- RSS 1.0 / RDF: items are siblings of the channel ----

#[derive(Debug, Deserialize)]
struct Rdf {
    channel: Option<RdfChannel>,
    #[serde(rename = "item", default)]
    item: Vec<RssItem>,
}

#[derive(Debug, Deserialize)]
struct RdfChannel {
    title: Option<String>,
}

// ---- Atom ----

#[derive(Debug, Deserialize)]
struct AtomFeed {
    title: Option<String>,
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<AtomLink>,
    summary: Option<String>,
    published: Option<String>,
    // Atom 0.3
    issued: Option<String>,
    updated: Option<String>,
    modified: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

impl From<AtomEntry> for RawEntry {
    fn from(it: AtomEntry) -> Self {
        let link = it
            .links
            .iter()
            .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
            .or_else(|| it.links.first())
            .and_then(|l| l.href.clone());
        RawEntry {
            title: it.title,
            link,
            summary: it.summary,
            published: it.published.or(it.issued),
            updated: it.updated.or(it.modified),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Rss,
    Rdf,
    Atom,
}

fn sniff_dialect(xml: &str) -> Result<Dialect> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().context("reading feed root element")? {
            Event::Start(e) | Event::Empty(e) => {
                let name = e.local_name();
                return match name.as_ref() {
                    b"rss" => Ok(Dialect::Rss),
                    b"RDF" => Ok(Dialect::Rdf),
                    b"feed" => Ok(Dialect::Atom),
                    other => bail!(
                        "unsupported feed root element <{}>",
                        String::from_utf8_lossy(other)
                    ),
                };
            }
            Event::Eof => bail!("feed document has no root element"),
            _ => {}
        }
    }
}

/// Parse a feed document into raw entries, preserving document order.
pub fn parse_feed(xml: &str) -> Result<RawFeed> {
    let t0 = std::time::Instant::now();
    let xml_clean = scrub_html_entities_for_xml(xml);

    let feed = match sniff_dialect(&xml_clean)? {
        Dialect::Rss => {
            let rss: Rss = from_str(&xml_clean).context("parsing rss xml")?;
            RawFeed {
                title: rss.channel.title,
                entries: rss.channel.item.into_iter().map(RawEntry::from).collect(),
            }
        }
        Dialect::Rdf => {
            let rdf: Rdf = from_str(&xml_clean).context("parsing rdf xml")?;
            RawFeed {
                title: rdf.channel.and_then(|c| c.title),
                entries: rdf.item.into_iter().map(RawEntry::from).collect(),
            }
        }
        Dialect::Atom => {
            let atom: AtomFeed = from_str(&xml_clean).context("parsing atom xml")?;
            RawFeed {
                title: atom.title,
                entries: atom.entry.into_iter().map(RawEntry::from).collect(),
            }
        }
    };

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("ingest_parse_ms").record(ms);
    Ok(feed)
}

/// HTML named entities are not defined in XML; rewrite the common ones as
/// numeric references so the XML parser accepts them.
fn scrub_html_entities_for_xml(s: &str) -> String {
    s.replace("&nbsp;", "&#160;")
        .replace("&ndash;", "&#8211;")
        .replace("&mdash;", "&#8212;")
        .replace("&ldquo;", "&#8220;")
        .replace("&rdquo;", "&#8221;")
        .replace("&lsquo;", "&#8216;")
        .replace("&rsquo;", "&#8217;")
        .replace("&hellip;", "&#8230;")
}
