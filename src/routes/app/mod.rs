pub mod dashboard_route;
pub mod outreach_route;
