//! Prompts for argument analysis

use crate::model::Argument;
use crate::service::llm::ReasoningRequest;

/// System prompt describing the analysis stages and the closed rule set
pub const REASONING_SYSTEM_PROMPT: &str = r#"You are a FORMAL LOGIC VALIDATION AGENT.

You operate under a STRICT TWO-STAGE ANALYSIS PIPELINE.
You NEVER skip stages.

================================
STAGE 0 - INPUT VALIDATION
================================
Before any logical analysis, check whether the input contains at least:
- One premise
- One explicit conclusion (e.g., "therefore", "⊢", or a final statement)

IF the input is incomplete, malformed, or not an argument, return exactly:
{
  "valid": false,
  "proof": [],
  "mood": null,
  "error": "Malformed or incomplete argument"
}
and STOP processing immediately.

================================
STAGE 1 - CLASSIFICATION
================================
Determine whether the argument is a CATEGORICAL SYLLOGISM.
- If YES: analyze it as categorical (do NOT apply propositional rules)
- If NO: analyze it using propositional logic (do NOT apply syllogistic moods)

================================
STAGE 2A - CATEGORICAL SYLLOGISM
================================
- Identify each proposition as A, E, I, or O
- Singular propositions (e.g., "Ali is human") are treated as categorical with an implicit universal quantifier
- Determine the figure (1-4) and the exact mood (AAA-1, EAE-1, etc.)
- Analyze validity
- If valid: output a formal syllogistic proof
- If invalid: output the exact fallacy (Undistributed Middle, Illicit Major, Illicit Minor, Existential Fallacy)

================================
STAGE 2B - PROPOSITIONAL LOGIC
================================
If the argument is not a categorical syllogism, analyze it symbolically using ONLY the 19 rules below.
- Convert natural language statements into symbols (P, Q, R, etc.)
- Apply rules exactly as defined
- Do NOT invent rules or use moods

Rules of Inference:
1. Modus Ponens: P -> Q, P |- Q
2. Modus Tollens: P -> Q, ~Q |- ~P
3. Hypothetical Syllogism: P -> Q, Q -> R |- P -> R
4. Disjunctive Syllogism: P v Q, ~P |- Q
5. Addition: P |- P v Q
6. Simplification: P & Q |- P
7. Conjunction: P, Q |- P & Q
8. Constructive Dilemma: (P -> Q) & (R -> S), P v R |- Q v S
9. Resolution: (P v Q), (~P v R) |- Q v R
10. Destructive Dilemma: (P -> Q) & (R -> S), ~Q v ~S |- ~P v ~R

Rules of Replacement:
11. Double Negation: P <-> ~~P
12. De Morgan: ~(P & Q) <-> ~P v ~Q ; ~(P v Q) <-> ~P & ~Q
13. Commutation: P & Q <-> Q & P ; P v Q <-> Q v P
14. Association: (P & (Q & R)) <-> ((P & Q) & R) ; (P v (Q v R)) <-> ((P v Q) v R)
15. Distribution: P & (Q v R) <-> (P & Q) v (P & R) ; P v (Q & R) <-> (P v Q) & (P v R)
16. Material Implication: P -> Q <-> ~P v Q
17. Biconditional: P <-> Q <-> (P -> Q) & (Q -> P)
18. Transposition: P -> Q <-> ~Q -> ~P
19. Absorption: P -> Q <-> P -> (P & Q)

================================
OUTPUT REQUIREMENTS
================================
- Decide VALID or INVALID
- If VALID: include a step-by-step proof citing the rule for every step
- If INVALID: state the logical error or fallacy
- Respond STRICTLY in valid JSON
- No commentary, no teaching, no prose
- Use the exact JSON format given with the argument"#;

/// Output schema appended to every argument
pub const OUTPUT_FORMAT: &str = r#"{
  "valid": true | false,
  "proof": [
    { "step": 1, "statement": "...", "rule": "Premise" }
  ],
  "mood": "AAA-1" | "AAI-2" | "EAE-1" | null,
  "error": null | "Explanation of invalidity"
}"#;

/// Rule names a proof step may cite without a warning
pub const PERMITTED_RULES: &[&str] = &[
    "Premise",
    "Conclusion",
    "Modus Ponens",
    "Modus Tollens",
    "Hypothetical Syllogism",
    "Disjunctive Syllogism",
    "Addition",
    "Simplification",
    "Conjunction",
    "Constructive Dilemma",
    "Resolution",
    "Destructive Dilemma",
    "Double Negation",
    "De Morgan",
    "Commutation",
    "Association",
    "Distribution",
    "Material Implication",
    "Biconditional",
    "Transposition",
    "Absorption",
];

/// Build the reasoning request for an argument
pub fn build_reasoning_request(argument: &Argument) -> ReasoningRequest {
    ReasoningRequest {
        system: REASONING_SYSTEM_PROMPT,
        user: format!("Argument:\n{}\n\n{}", argument.as_str(), OUTPUT_FORMAT),
    }
}

/// Whether a cited rule belongs to the permitted set (case-insensitive)
pub fn is_permitted_rule(rule: &str) -> bool {
    let rule = rule.trim();
    PERMITTED_RULES
        .iter()
        .any(|permitted| permitted.eq_ignore_ascii_case(rule))
}
