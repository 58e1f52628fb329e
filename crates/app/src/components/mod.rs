mod pager;
mod results;
mod search_page;

pub use pager::{PagerBar, PagerBarProps};
pub use results::{ResultCardView, ResultCardViewProps, ResultsPanel, ResultsPanelProps};
pub use search_page::{SearchPage, SearchPageProps, SUBJECT_OPTIONS};
