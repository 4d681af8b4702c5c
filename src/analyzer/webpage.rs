use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::utils::datastruct::list::DoubleLinkedList;
use crate::utils::datastruct::set::ChainedHashSet;

/// A set of documents keyed by their URI.
pub type Corpus<U = String> = ChainedHashSet<Webpage<U>>;

/// Webpage
/// 解析対象のドキュメント
/// 単語列と、同じ識別子型で表した外向きリンク列を持つ
///
/// Equality and hashing look at `uri` only, so a `Corpus` holds at most one
/// page per URI and can be queried with a bare URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webpage<U = String> {
    uri: U,
    words: DoubleLinkedList<String>,
    links: DoubleLinkedList<U>,
}

impl<U> Webpage<U> {
    pub fn new<W, L>(uri: U, words: W, links: L) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        L: IntoIterator<Item = U>,
    {
        Webpage {
            uri,
            words: words.into_iter().map(Into::into).collect(),
            links: links.into_iter().collect(),
        }
    }

    #[inline]
    pub fn uri(&self) -> &U {
        &self.uri
    }

    #[inline]
    pub fn words(&self) -> &DoubleLinkedList<String> {
        &self.words
    }

    #[inline]
    pub fn links(&self) -> &DoubleLinkedList<U> {
        &self.links
    }
}

impl<U: PartialEq> PartialEq for Webpage<U> {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri
    }
}

impl<U: Eq> Eq for Webpage<U> {}

impl<U: Hash> Hash for Webpage<U> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uri.hash(state);
    }
}

impl<U> Borrow<U> for Webpage<U> {
    fn borrow(&self) -> &U {
        &self.uri
    }
}
