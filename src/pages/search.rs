//! The catalog search page.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::api::{ApiError, ShowcaseClient};
use crate::config::Store;
use crate::error::{ConfigError, ValidationError};
use crate::prompt::Prompter;
use crate::render::{render_grid, ProductCard, NO_RESULTS};

/// What the search input is interpreted as.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Free-text keywords searched in the selected store.
    #[default]
    Keywords,
    /// A single product page URL.
    Url,
    /// A category page URL.
    Category,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keywords => "keywords",
            Self::Url => "url",
            Self::Category => "category",
        })
    }
}

impl FromStr for SearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keywords" => Ok(Self::Keywords),
            "url" => Ok(Self::Url),
            "category" => Ok(Self::Category),
            other => Err(ConfigError::UnknownSearchMode {
                mode: other.to_string(),
            }),
        }
    }
}

/// The result of one search.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// At least one product was found.
    Results(Vec<ProductCard>),
    /// The search succeeded but found nothing.
    NoResults,
    /// The search failed.
    Failed {
        /// The message shown in place of results.
        message: String,
    },
}

/// Message rendered in place of results when a search fails.
pub const SEARCH_FAILED: &str = "Error searching products";

/// State of the search page.
///
/// The controller owns the selected mode and store and the rendered result
/// grid. Each search replaces the previous results.
pub struct SearchController {
    client: Arc<ShowcaseClient>,
    prompter: Arc<dyn Prompter>,
    mode: SearchMode,
    store: Store,
    outcome: Option<SearchOutcome>,
    html: String,
}

impl fmt::Debug for SearchController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("mode", &self.mode)
            .field("store", &self.store)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl SearchController {
    /// Creates an empty search page.
    #[must_use]
    pub fn new(client: Arc<ShowcaseClient>, prompter: Arc<dyn Prompter>) -> Self {
        Self {
            client,
            prompter,
            mode: SearchMode::default(),
            store: Store::default(),
            outcome: None,
            html: String::new(),
        }
    }

    /// Selects how the next input is interpreted.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    /// Selects the store for keyword and URL searches.
    pub fn set_store(&mut self, store: Store) {
        self.store = store;
    }

    /// Returns the selected mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Returns the selected store.
    #[must_use]
    pub const fn store(&self) -> Store {
        self.store
    }

    /// Returns the outcome of the last search.
    #[must_use]
    pub const fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// Returns the rendered result area.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Runs a search and renders the results.
    ///
    /// Blank input is rejected before any request is sent and reported to
    /// the operator. Every other failure is rendered in place of the results.
    /// An empty result set and a failed search are also alerted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyInput`] for blank input.
    pub async fn search(&mut self, input: &str) -> Result<&SearchOutcome, ValidationError> {
        let query = input.trim();
        if query.is_empty() {
            let error = ValidationError::EmptyInput {
                field: "a search term",
            };
            self.prompter.alert(&error.to_string());
            return Err(error);
        }

        let result = match self.mode {
            SearchMode::Keywords => self.client.search(query, self.store).await,
            SearchMode::Url => self.client.product_by_url(query, self.store).await,
            SearchMode::Category => self.client.category(query).await,
        };

        let (html, outcome) = match result {
            Ok(products) if products.is_empty() => (render_grid(&[]).0, SearchOutcome::NoResults),
            Ok(products) => {
                let (html, cards) = render_grid(&products);
                (html, SearchOutcome::Results(cards))
            }
            Err(ApiError::Rejected { message }) => {
                tracing::debug!(mode = %self.mode, %message, "search rejected");
                (render_grid(&[]).0, SearchOutcome::NoResults)
            }
            Err(error) => {
                tracing::warn!(mode = %self.mode, %error, "search failed");
                self.prompter.alert(SEARCH_FAILED);
                (
                    format!(r#"<p class="error-state">{SEARCH_FAILED}</p>"#),
                    SearchOutcome::Failed {
                        message: SEARCH_FAILED.to_string(),
                    },
                )
            }
        };

        if outcome == SearchOutcome::NoResults {
            self.prompter.alert(NO_RESULTS);
        }
        self.html = html;
        Ok(self.outcome.insert(outcome))
    }
}
