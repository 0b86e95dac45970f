/// Name Classification
pub mod name_classification;
