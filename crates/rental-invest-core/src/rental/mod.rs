pub mod amortization;
pub mod analysis;
pub mod params;
pub mod projection;
pub mod results;

pub use amortization::{amortize, Amortization, AmortizationEntry, PaymentBasis, YearlyLoanSummary};
pub use analysis::{analyze_investment, InvestmentAnalysis, Ratings};
pub use params::{InvestmentParams, TaxSystem};
pub use results::{compute_results, InvestmentResults, PROJECTION_YEARS};
