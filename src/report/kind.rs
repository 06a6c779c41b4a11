//! Fixed report shapes

/// Default dimension for page view reports
pub const DEFAULT_PAGE_VIEW_DIMENSION: &str = "hostName";

/// One of the five report shapes exposed as tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    PageViews,
    ActiveUsers,
    Events,
    UserBehavior,
    SourceMedium,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::PageViews,
        ReportKind::ActiveUsers,
        ReportKind::Events,
        ReportKind::UserBehavior,
        ReportKind::SourceMedium,
    ];

    /// Tool name used on the wire
    pub fn tool_name(self) -> &'static str {
        match self {
            ReportKind::PageViews => "get-page-views",
            ReportKind::ActiveUsers => "get-active-users",
            ReportKind::Events => "get-events",
            ReportKind::UserBehavior => "get-user-behavior",
            ReportKind::SourceMedium => "get-source-media",
        }
    }

    pub fn from_tool_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tool_name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportKind::PageViews => "Get page view metrics for a specific date range",
            ReportKind::ActiveUsers => "Get active and new users metrics for a specific date range",
            ReportKind::Events => "Get event metrics for a specific date range",
            ReportKind::UserBehavior => {
                "Get user behavior metrics like session duration and bounce rate"
            }
            ReportKind::SourceMedium => {
                "Get traffic source and medium data for a specific date range"
            }
        }
    }

    /// Metrics requested by this report
    pub fn metrics(self) -> &'static [&'static str] {
        match self {
            ReportKind::PageViews => &["screenPageViews"],
            ReportKind::ActiveUsers => &["activeUsers", "newUsers"],
            ReportKind::Events => &["eventCount"],
            ReportKind::UserBehavior => &["averageSessionDuration", "bounceRate", "sessionsPerUser"],
            ReportKind::SourceMedium => &["sessions", "activeUsers"],
        }
    }

    /// Fixed dimensions; page views only use these when the caller gives none
    pub fn default_dimensions(self) -> &'static [&'static str] {
        match self {
            ReportKind::PageViews => &[DEFAULT_PAGE_VIEW_DIMENSION],
            ReportKind::ActiveUsers | ReportKind::UserBehavior => &["date"],
            ReportKind::Events => &["eventName", "date"],
            ReportKind::SourceMedium => &["sessionSource", "sessionMedium", "sessionCampaignName"],
        }
    }

    pub fn accepts_dimensions(self) -> bool {
        self == ReportKind::PageViews
    }

    pub fn accepts_event_name(self) -> bool {
        self == ReportKind::Events
    }
}
