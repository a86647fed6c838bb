// Scripted dictionary shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use etym_core::error::SourceError;
use etym_core::{DictionarySource, Lookup, Section};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const CASTLE: &str = include_str!("../fixtures/castle_etymology.html");
pub const MICE: &str = include_str!("../fixtures/mice_page.html");
pub const QUICKLY: &str = include_str!("../fixtures/quickly_etymology.html");
pub const COLOUR: &str = include_str!("../fixtures/colour_etymology.html");

#[derive(Default, Clone)]
struct Page {
    sections: Vec<Section>,
    html: String,
    etymology_html: Option<String>,
}

/// In-memory stand-in for Wiktionary. Unknown titles are missing pages;
/// titles marked as failing answer every request with a 503.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<HashMap<String, Page>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

fn section(index: &str, line: &str) -> Section {
    Section { index: index.into(), line: line.into() }
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page whose etymology section renders as `html`.
    pub fn etymology(self, title: &str, html: &str) -> Self {
        let page = Page {
            sections: vec![
                section("1", "English"),
                section("2", "Etymology"),
                section("3", "Noun"),
            ],
            html: String::new(),
            etymology_html: Some(html.to_string()),
        };
        self.pages.lock().unwrap().insert(title.to_string(), page);
        self
    }

    /// A page with no etymology section; `html` is the full rendered page.
    pub fn without_etymology(self, title: &str, html: &str) -> Self {
        let page = Page {
            sections: vec![section("1", "English"), section("2", "Noun")],
            html: html.to_string(),
            etymology_html: None,
        };
        self.pages.lock().unwrap().insert(title.to_string(), page);
        self
    }

    /// A "plural of `base`" stub with a bare English heading.
    pub fn plural_of(self, title: &str, base: &str) -> Self {
        let html = format!(
            r#"<h2 id="English">English</h2><ol><li>plural of <a href="/wiki/{base}#English" title="{base}">{base}</a></li></ol>"#
        );
        self.without_etymology(title, &html)
    }

    pub fn failing(self, title: &str) -> Self {
        self.fail(title);
        self
    }

    pub fn fail(&self, title: &str) {
        self.failing.lock().unwrap().insert(title.to_string());
    }

    pub fn heal(&self, title: &str) {
        self.failing.lock().unwrap().remove(title);
    }

    /// Requests made for `title`, of any kind.
    pub fn calls_for(&self, title: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|t| *t == title).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn record(&self, title: &str) -> Result<Option<Page>, SourceError> {
        self.calls.lock().unwrap().push(title.to_string());
        if self.failing.lock().unwrap().contains(title) {
            return Err(SourceError::Server { status: 503 });
        }
        Ok(self.pages.lock().unwrap().get(title).cloned())
    }
}

#[async_trait]
impl DictionarySource for ScriptedSource {
    async fn sections(&self, title: &str) -> Result<Lookup<Vec<Section>>, SourceError> {
        Ok(match self.record(title)? {
            Some(page) => Lookup::Found(page.sections),
            None => Lookup::Missing,
        })
    }

    async fn page_html(&self, title: &str) -> Result<Lookup<String>, SourceError> {
        Ok(match self.record(title)? {
            Some(page) => Lookup::Found(page.html),
            None => Lookup::Missing,
        })
    }

    async fn section_html(&self, title: &str, index: &str) -> Result<Lookup<String>, SourceError> {
        let page = self.record(title)?;
        Ok(match page.and_then(|p| p.etymology_html.filter(|_| index == "2")) {
            Some(html) => Lookup::Found(html),
            None => Lookup::Missing,
        })
    }
}

pub fn etymology_html(text: &str) -> String {
    format!(r#"<div class="mw-parser-output"><p>{text}</p></div>"#)
}
