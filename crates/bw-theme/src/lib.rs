//! Theme resolution for Blockwork.
//!
//! A theme is a flat set of CSS custom properties authored as a table. The
//! table's location is not known in advance: the resolver walks a cascade of
//! candidate locations derived from the page path, takes the first that
//! exists, and writes the variables into one `<style>` element.
//!
//! - [`candidate_paths`]: the cascade for a page path
//! - [`ThemeVariables`]: ordered, `--`-normalized variable set
//! - [`parse_page`] / [`parse_sheet`]: the two tabular formats
//! - [`StyleSink`]: where the serialized variables go
//! - [`ThemeResolver`]: probing, fallback and failure policy
//!
//! # Example
//!
//! ```
//! use bw_theme::candidate_paths;
//!
//! assert_eq!(
//!     candidate_paths("/en/products", "theme-configurator"),
//!     vec![
//!         "/en/products/theme-configurator",
//!         "/en/theme-configurator",
//!         "/theme-configurator",
//!     ]
//! );
//! ```

mod candidates;
mod error;
mod parse;
mod resolver;
mod sink;
mod variables;

pub use candidates::candidate_paths;
pub use error::ThemeError;
pub use parse::{parse_page, parse_sheet};
pub use resolver::{ResolvedTheme, ThemeRequest, ThemeResolver, ThemeSource};
pub use sink::StyleSink;
pub use variables::{ThemeVariables, variable_name};
