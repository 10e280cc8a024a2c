mod analytics_tests;
mod reports_tests;
mod upload_tests;
