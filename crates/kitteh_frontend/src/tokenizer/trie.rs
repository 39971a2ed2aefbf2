use std::collections::HashMap;
use std::sync::OnceLock;

use crate::token::Keyword;

/// A prefix tree over keyword words, so multi-word keywords can be matched
/// one lexeme at a time.
#[derive(Debug, Default)]
pub(super) struct KeywordTrie {
    children: HashMap<&'static str, KeywordTrie>,
    keyword: Option<Keyword>,
}

impl KeywordTrie {
    pub fn get() -> &'static KeywordTrie {
        static TRIE: OnceLock<KeywordTrie> = OnceLock::new();
        TRIE.get_or_init(|| Self::build(Keyword::ALL))
    }

    fn build(keywords: &[Keyword]) -> Self {
        let mut root = Self::default();

        for &keyword in keywords {
            let node = keyword
                .as_str()
                .split(' ')
                .fold(&mut root, |node, word| node.children.entry(word).or_default());

            node.keyword = Some(keyword);
        }

        root
    }

    pub fn child(&self, word: &str) -> Option<&KeywordTrie> {
        self.children.get(word)
    }

    pub fn keyword(&self) -> Option<Keyword> {
        self.keyword
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
