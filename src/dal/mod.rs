pub mod company_list;
pub mod founder_output;
