//! Integration tests for the slidecast CLI and the end-to-end
//! record → encode → parse → synchronize pipeline.

mod cli_test;
mod pipeline_test;
