use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts,
};
use html5ever::LocalName;
use log::trace;
use std::cell::RefCell;
use std::collections::HashSet;

use crate::page::{PageExtract, Role};
use crate::tokenizer::normalize;

#[derive(Default)]
struct SinkState {
    last_start_tag: Option<LocalName>,
    text: String,
    seen_links: HashSet<String>,
    extract: PageExtract,
}

impl SinkState {
    fn in_hidden_text(&self) -> bool {
        match &self.last_start_tag {
            Some(tag) => *tag == LocalName::from("script") || *tag == LocalName::from("style"),
            None => false,
        }
    }

    // The tokenizer hands out text in pieces (around character references,
    // for instance), so a text node is only complete at the next non-text token.
    fn flush_text(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.text);
        if self.in_hidden_text() {
            return;
        }
        // Character references were decoded by the tokenizer; a second pass
        // turns doubly escaped markup such as `&amp;lt;` into plain brackets.
        let content = html_escape::decode_html_entities(text.trim());
        if !content.is_empty() {
            self.extract.words.extend(normalize(&content));
        }
    }

    fn add_link(&mut self, href: &str) {
        if self.seen_links.insert(href.to_string()) {
            self.extract.links.push(href.to_string());
        }
    }
}

/// Elements whose content is text rather than markup.
fn raw_kind(name: &LocalName) -> Option<RawKind> {
    match &**name {
        "script" => Some(RawKind::ScriptData),
        "style" | "xmp" | "iframe" | "noembed" | "noframes" | "noscript" => Some(RawKind::Rawtext),
        "title" | "textarea" => Some(RawKind::Rcdata),
        _ => None,
    }
}

struct PageSink {
    role: Role,
    state: RefCell<SinkState>,
}

impl PageSink {
    fn new(role: Role) -> PageSink {
        PageSink {
            role,
            state: RefCell::new(SinkState::default()),
        }
    }

    fn take_extract(&self) -> PageExtract {
        std::mem::take(&mut self.state.borrow_mut().extract)
    }
}

impl TokenSink for PageSink {
    type Handle = ();

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<Self::Handle> {
        let mut state = self.state.borrow_mut();
        match token {
            Token::CharacterTokens(text) => state.text.push_str(&text),
            Token::NullCharacterToken => {}
            Token::ParseError(error) => trace!("line {}: {}", line_number, error),
            Token::TagToken(tag) => {
                state.flush_text();
                // Self-closing tags (`<a href="x"/>`) are neither harvested nor
                // remembered as the current start tag.
                if tag.kind == TagKind::StartTag && !tag.self_closing {
                    if self.role.harvests_links() && tag.name == LocalName::from("a") {
                        if let Some(href) = tag
                            .attrs
                            .iter()
                            .find(|attr| attr.name.local == LocalName::from("href"))
                        {
                            state.add_link(&href.value);
                        }
                    }

                    let raw_kind = raw_kind(&tag.name);
                    state.last_start_tag = Some(tag.name);

                    if let Some(kind) = raw_kind {
                        return TokenSinkResult::RawData(kind);
                    }
                }
            }
            _ => state.flush_text(),
        }

        TokenSinkResult::Continue
    }
}

/// Tokenizes an HTML fragment and collects its visible words, plus the
/// distinct `href` targets of its anchors when `role` is [`Role::Root`].
///
/// Links come back exactly as written in the markup, in document order.
pub fn extract(body: &str, role: Role) -> PageExtract {
    let tokenizer = Tokenizer::new(PageSink::new(role), TokenizerOpts::default());
    let buffer = BufferQueue::default();
    buffer.push_back(body.into());
    let _ = tokenizer.feed(&buffer);
    tokenizer.end();

    tokenizer.sink.take_extract()
}
