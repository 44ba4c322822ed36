use reqwest::Method;
use whisk_core::{Rule, RuleState};

use crate::{Error, Response, Rules};

impl Rules<'_> {
    /// Enable or disable a rule.
    ///
    /// `state` must be `enable` or `disable` in any letter case; anything
    /// else fails with [`Error::Validation`] and sends nothing.
    pub async fn set_state(&self, name: &str, state: &str) -> Result<Response<Rule>, Error> {
        let state: RuleState = state
            .parse()
            .map_err(|e: whisk_core::InvalidRuleState| Error::validation(e.to_string()))?;
        let route = Self::route(name)?.param("state", state);
        self.client.send(Method::POST, &route, None::<&()>).await
    }
}
