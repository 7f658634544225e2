pub mod candidate_llm;

pub use candidate_llm::LlmCandidateAdapter;
