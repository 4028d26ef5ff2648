pub mod action;
pub mod action_kind;
pub mod batch;
pub mod encoded_action;
pub mod records;
pub mod scale;
