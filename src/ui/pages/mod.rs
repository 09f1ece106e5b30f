pub mod backoffice;
pub mod calculator;
pub mod login;
pub mod valuation;

pub use backoffice::BackofficePage;
pub use calculator::CalculatorPage;
pub use login::LoginPage;
pub use valuation::ValuationPage;
