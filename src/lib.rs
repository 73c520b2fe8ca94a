pub mod codes;
pub mod data;
pub mod report;
pub mod survey;
