//! Prompt builders for the profile and portrait services.

use super::{PortraitRequest, ProfileRequest};

pub const PROFILE_SYSTEM_INSTRUCTION: &str = "You are a veteran tabletop role-playing game \
writer. You turn terse character sheets into vivid, playable characters for game masters. \
Write in evocative but concise prose, favour concrete details a GM can use at the table, \
and always follow the requested markdown layout exactly.";

pub const DEFAULT_PORTRAIT_STYLE: &str = "Painted fantasy character portrait, head and \
shoulders, dramatic rim lighting, muted earthy palette, detailed textures, no text or \
lettering, plain dark background.";

/// Prompt for the narrative profile. Lists the required layout so the
/// section extractor can find every header.
pub fn profile_prompt(request: &ProfileRequest) -> String {
    let c = &request.character;
    let mut prompt = String::new();

    prompt.push_str("Create a detailed character profile for the following character.\n\n");
    prompt.push_str(&format!("Name: {}\n", c.name));
    prompt.push_str(&format!("Race: {}\n", c.race));
    prompt.push_str(&format!("Gender: {}\n", c.gender));
    prompt.push_str(&format!("Profession: {}\n", c.profession));
    prompt.push_str(&format!("Physical traits: {}\n", c.physical));
    prompt.push_str(&format!("Summary: {}\n\n", c.description));

    prompt.push_str(&format!("Personality DNA: {}\n", request.dna));
    prompt.push_str("The DNA decodes as follows; let it shape every section:\n");
    prompt.push_str(&request.dna_summary);
    prompt.push_str("\n\n");

    prompt.push_str("Use exactly this markdown layout:\n\n");
    prompt.push_str(&format!("# {}\n", c.name));
    prompt.push_str("**Role:** <one-line role> | **Alignment:** <alignment from the DNA>\n\n");
    prompt.push_str("| Trait | Value |\n|-------|-------|\n");
    prompt.push_str("| Age | ... |\n| Height | ... |\n| Build | ... |\n| Homeland | ... |\n\n");
    for title in &request.section_titles {
        prompt.push_str(&format!("## {}\n<content>\n\n", title));
    }
    prompt.push_str(
        "Keep each section between one and three short paragraphs or a short bullet list. \
         Do not add sections that are not listed.",
    );
    prompt
}

pub fn portrait_prompt(request: &PortraitRequest) -> String {
    let c = &request.character;
    format!(
        "Portrait of {}, a {} {} {}. Physical traits: {}. Style: {}",
        c.name, c.gender, c.race, c.profession.to_lowercase(), c.physical, request.style
    )
}
