//! Location fragments and what they mean.
//!
//! A fragment is either `albums/<volume>` (open the detail for that volume) or
//! anything else, which is taken as a filter token. The router only parses and
//! tracks the current fragment; acting on a [`Route`] is the catalog's job.

use crate::catalog::Filter;

const DETAILS_PREFIX: &str = "albums/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Details { volume: String },
    Filter(Filter),
}

impl Route {
    /// Parse a fragment. A leading `#` and/or `/` is ignored, so `#/albums/2`,
    /// `/albums/2` and `albums/2` are equivalent.
    pub fn parse(fragment: &str) -> Self {
        let path = normalize(fragment);
        match path.strip_prefix(DETAILS_PREFIX) {
            Some(volume) if !volume.is_empty() && !volume.contains('/') => Route::Details {
                volume: volume.to_string(),
            },
            _ => Route::Filter(Filter::from_token(path)),
        }
    }

    /// Fragment that routes to the detail view for `volume`.
    pub fn details_fragment(volume: &str) -> String {
        format!("{}{}", DETAILS_PREFIX, volume)
    }
}

fn normalize(fragment: &str) -> &str {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    path.strip_prefix('/').unwrap_or(path)
}

/// Tracks the current location fragment.
#[derive(Debug, Default)]
pub struct Router {
    fragment: String,
    started: bool,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin routing from `initial` and return the route to dispatch.
    ///
    /// Navigations before `start` only record the fragment.
    pub fn start(&mut self, initial: &str) -> Route {
        self.started = true;
        self.fragment = normalize(initial).to_string();
        Route::parse(&self.fragment)
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Replace the current fragment. Returns the route to dispatch when
    /// `trigger` is set and routing has started.
    ///
    /// Navigating to the current fragment with `trigger` still dispatches.
    pub fn navigate(&mut self, fragment: &str, trigger: bool) -> Option<Route> {
        self.fragment = normalize(fragment).to_string();
        if trigger && self.started {
            Some(Route::parse(&self.fragment))
        } else {
            None
        }
    }

    /// Current fragment without leading `#/`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Current fragment in shareable `#/...` form.
    pub fn location(&self) -> String {
        format!("#/{}", self.fragment)
    }
}
