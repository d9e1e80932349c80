// Resume/job scoring: prompt the model, then recover a strict result from
// whatever comes back. All LLM calls go through llm_client.

pub mod decode;
pub mod extract;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod text;
