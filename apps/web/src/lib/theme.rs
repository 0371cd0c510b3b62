//! Shared UI themes and Tailwind class constants to ensure visual consistency
//! across the application.

pub struct Theme;

impl Theme {
    /// Card container used for stats, panels, and list sections.
    pub const CARD: &'static str =
        "rounded-lg border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-900 p-6 shadow-sm";

    /// Text input shared by every form.
    pub const INPUT: &'static str = "w-full rounded-md border border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-800 px-3 py-2 text-sm focus:outline-none focus:ring-2 focus:ring-gray-400";

    /// Label above a form input.
    pub const LABEL: &'static str =
        "block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1";

    /// Page heading.
    pub const HEADING: &'static str = "text-3xl font-bold tracking-tight";

    /// Muted descriptive text under a heading.
    pub const SUBTEXT: &'static str = "text-sm text-gray-500 dark:text-gray-400";

    /// Clickable row or tile that highlights on hover.
    pub const TILE: &'static str = "rounded-lg border border-gray-200 dark:border-gray-700 p-3 hover:bg-gray-50 dark:hover:bg-gray-800 transition-colors";
}
