use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::MediaDraft;
use super::Message;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResolverName {
    Canned,
    Echo,
}

impl ResolverName {
    pub fn parse(text: String) -> Option<ResolverName> {
        return ResolverName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait Resolver {
    fn name(&self) -> ResolverName;

    /// Computes the assistant reply for a finalized user message. Called
    /// exactly once per send sequence, after the composing delay has passed.
    ///
    /// The returned items become the content of the resolved assistant
    /// message. Returning an error, or no items at all, makes the session
    /// store fall back to a generic apology so the sequence still resolves.
    async fn resolve(&self, message: &Message) -> Result<Vec<MediaDraft>>;
}

pub type ResolverBox = Arc<dyn Resolver + Send + Sync>;
