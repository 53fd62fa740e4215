//! Presentation view models
//!
//! Pure functions from session state (and the catalog entry it points at)
//! to serialisable views. Nothing here computes beyond formatting and
//! picking style classes by threshold.

pub mod analysis;
pub mod code;
pub mod page;
pub mod problem;
pub mod test_cases;

pub use analysis::{OptimalSolutionView, RuntimeAnalysisView, SubmissionResultsView};
pub use code::{CodePanelView, Token, TokenKind};
pub use page::SessionPageView;
pub use problem::{ProblemOptionView, ProblemSelectorView, ProblemStatementView};
pub use test_cases::{TestCaseRowView, TestCasesView};
