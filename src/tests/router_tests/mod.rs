mod dashboard_tests;
mod diagnostic_tests;
