pub mod canned;
pub mod echo;

use std::sync::Arc;

use anyhow::Result;

use crate::domain::models::ResolverBox;
use crate::domain::models::ResolverName;

pub struct ResolverManager {}

impl ResolverManager {
    pub fn get(name: ResolverName) -> Result<ResolverBox> {
        match name {
            ResolverName::Canned => return Ok(Arc::<canned::Canned>::default()),
            ResolverName::Echo => return Ok(Arc::<echo::Echo>::default()),
        }
    }
}
