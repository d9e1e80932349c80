// Inputs to scoring that come from outside the request body's plain fields:
// uploaded resume files and job descriptions fetched by URL.

pub mod job_fetcher;
pub mod resume;
