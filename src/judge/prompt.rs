use crate::score::Dimension;

/// System instruction sent with every judge request.
pub const JUDGE_SYSTEM_PROMPT: &str = "Return JSON only. No markdown.";

/// Builds the instruction text sent to the judge model.
///
/// The rubric, the required JSON shape and the verbatim prompt/output are the
/// same whatever backend or model ends up executing it.
pub fn judge_prompt(prompt: &str, output: &str) -> String {
    let mut text = String::from(
        "You are a strict creative-writing judge.\n\n\
         Rate the writing from 0 to 10 in each category:\n",
    );
    for dimension in Dimension::ALL {
        let (description, low, mid, high) = anchors(dimension);
        text.push_str(&format!(
            "- {} ({description})\n  0-3: {low}\n  4-6: {mid}\n  7-10: {high}\n",
            dimension.key()
        ));
    }

    text.push_str("\nReturn ONLY valid JSON with exactly these keys and nothing else:\n{\n");
    let keys: Vec<String> = Dimension::ALL
        .iter()
        .map(|d| format!("  \"{}\": number", d.key()))
        .collect();
    text.push_str(&keys.join(",\n"));
    text.push_str("\n}\n\nPrompt:\n");
    text.push_str(prompt);
    text.push_str("\n\nModel Output:\n");
    text.push_str(output);
    text
}

fn anchors(dimension: Dimension) -> (&'static str, &'static str, &'static str, &'static str) {
    match dimension {
        Dimension::CharacterClarity => (
            "is the character vivid and understandable?",
            "no discernible character, or a name with no traits",
            "recognisable character with generic or inconsistent traits",
            "distinct, believable character whose motives are clear",
        ),
        Dimension::Originality => (
            "fresh, non-generic ideas",
            "cliched premise and stock phrasing throughout",
            "familiar ideas with some personal touches",
            "surprising angle or imagery that feels new",
        ),
        Dimension::SensoryDetail => (
            "concrete imagery: sights/sounds/smells/tactile",
            "abstract telling with no concrete imagery",
            "some concrete details, mostly visual",
            "rich, specific detail across several senses",
        ),
        Dimension::ToneConsistency => (
            "tone stays consistent and intentional",
            "tone shifts randomly or contradicts the prompt",
            "mostly steady tone with noticeable lapses",
            "deliberate tone held from first line to last",
        ),
    }
}
