//! Instruction template sent with every analysis request.

const INSTRUCTIONS: &str = "Analyze the following code snippet and determine its Time Complexity and Space Complexity using Big O notation.
Provide a brief explanation for each. Format the output exactly like the example below and DO NOT GIVE ANYTHING ELSE, ONLY GIVE ITS COMPLEXITY:

Time Complexity: O(N)
Space Complexity: O(1)
";

const CODE_HEADER: &str = "--- Code ---";
const ANALYSIS_HEADER: &str = "--- Analysis ---";
const FENCE: &str = "```";

/// Embeds `code` verbatim in the analysis instructions.
pub fn build_prompt(code: &str) -> String {
    format!("\n{INSTRUCTIONS}\n{CODE_HEADER}\n{FENCE}\n{code}\n{FENCE}\n{ANALYSIS_HEADER}\n")
}
