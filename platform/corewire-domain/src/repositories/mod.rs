pub mod action_submitter;
pub mod batch_caller;
pub mod contract_caller;
