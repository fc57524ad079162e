pub(crate) mod genome_model;
pub(crate) mod run_report;
