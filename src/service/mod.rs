pub mod llm;
pub mod verdict;

#[cfg(test)]
pub mod test_support;

pub use llm::ChatCompletionsClient;
pub use verdict::VerdictService;
