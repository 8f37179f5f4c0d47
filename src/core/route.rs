//! # Route Dispatcher
//!
//! Maps an address (`questions/<action-or-index>`) to one navigator
//! operation, then rewrites the address to the position that operation
//! produced. The current address is therefore always a bookmarkable
//! encoding of where the navigator is, never the literal request
//! (`questions/next` resolves to e.g. `questions/4`).
//!
//! ```text
//! ""                    start    -> questions/1
//! questions/shuffle     shuffle  -> questions/1
//! questions/next        next     -> questions/<pos+1>
//! questions/previous    previous -> questions/<pos+1>
//! questions/first       first    -> questions/1
//! questions/last        last     -> questions/<len>
//! questions/redraw      redraw   -> questions/<pos+1>
//! questions/<n>         show n   -> questions/<clamped n>
//! ```
//!
//! This is the only place that converts between the 1-based address index
//! and the navigator's 0-based position.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::deck::Deck;
use crate::core::navigator::{Navigator, ViewModel};

const PREFIX: &str = "questions/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Start,
    Shuffle,
    Next,
    Previous,
    First,
    Last,
    Redraw,
    /// 1-based index as it appears in the address.
    Show(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    Unrecognized(String),
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::Unrecognized(address) => write!(f, "unrecognized address: {address:?}"),
        }
    }
}

impl std::error::Error for RouteError {}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(address: &str) -> Result<Self, Self::Err> {
        let path = address
            .trim()
            .trim_start_matches('#')
            .trim_start_matches('/')
            .trim_end_matches('/');

        if path.is_empty() {
            return Ok(Route::Start);
        }

        let action = path
            .strip_prefix(PREFIX)
            .ok_or_else(|| RouteError::Unrecognized(address.to_string()))?;

        match action {
            "shuffle" => Ok(Route::Shuffle),
            "next" => Ok(Route::Next),
            "previous" => Ok(Route::Previous),
            "first" => Ok(Route::First),
            "last" => Ok(Route::Last),
            "redraw" => Ok(Route::Redraw),
            // Plain decimal digits only. Too-large indices saturate and are
            // clamped by the navigator like any other out-of-range index.
            index if !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) => {
                Ok(Route::Show(index.parse().unwrap_or(usize::MAX)))
            }
            _ => Err(RouteError::Unrecognized(address.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Start => Ok(()),
            Route::Shuffle => write!(f, "{PREFIX}shuffle"),
            Route::Next => write!(f, "{PREFIX}next"),
            Route::Previous => write!(f, "{PREFIX}previous"),
            Route::First => write!(f, "{PREFIX}first"),
            Route::Last => write!(f, "{PREFIX}last"),
            Route::Redraw => write!(f, "{PREFIX}redraw"),
            Route::Show(n) => write!(f, "{PREFIX}{n}"),
        }
    }
}

/// Owns the current address, its history, and the shuffle RNG. The root
/// deck and navigator are passed in per dispatch; only a shuffle mutates
/// the root.
pub struct RouteDispatcher {
    address: String,
    history: Vec<String>,
    rng: StdRng,
}

impl RouteDispatcher {
    pub fn new(rng: StdRng) -> Self {
        Self {
            address: String::new(),
            history: Vec::new(),
            rng,
        }
    }

    /// Deterministic shuffles when `seed` is set, OS entropy otherwise.
    pub fn with_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(rng)
    }

    /// The address as last resolved.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Parse and run `address`. On an unrecognized address nothing changes.
    pub fn dispatch(
        &mut self,
        address: &str,
        navigator: &mut Navigator,
        root: &mut Deck,
    ) -> Result<ViewModel, RouteError> {
        let route: Route = address.parse()?;
        Ok(self.dispatch_route(route, navigator, root))
    }

    pub fn dispatch_route(
        &mut self,
        route: Route,
        navigator: &mut Navigator,
        root: &mut Deck,
    ) -> ViewModel {
        match route {
            Route::Start | Route::First => navigator.first(),
            Route::Shuffle => {
                // Reorders the root itself, so later filters keep this order,
                // then shows all of it, dropping any filter.
                root.shuffle(&mut self.rng);
                navigator.swap_deck(root.clone());
                navigator.first();
                info!("Reshuffled {} items", navigator.len());
            }
            Route::Next => navigator.next(),
            Route::Previous => navigator.previous(),
            Route::Last => navigator.last(),
            Route::Redraw => navigator.redraw(),
            Route::Show(n) => navigator.goto_index(n.saturating_sub(1)),
        }

        let resolved = Route::Show(navigator.position() + 1).to_string();
        debug!("Dispatched {:?} -> {}", route, resolved);
        if self.history.last() != Some(&resolved) {
            self.history.push(resolved.clone());
        }
        self.address = resolved;
        navigator.view_model()
    }
}
