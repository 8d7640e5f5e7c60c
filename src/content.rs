//! Résumé sections carried by the blocks
//!
//! The content payload is opaque to the engine: it is handed back verbatim in
//! activation events and never inspected.

use serde::{Deserialize, Serialize};

/// One labeled section of the portfolio
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    /// Short label drawn above the block
    pub label: String,
    /// Rich-text payload (HTML on the web)
    pub content: String,
}

impl BlockSpec {
    pub fn new(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            content: content.into(),
        }
    }
}

/// Shown by the presentation layer when a section has an empty payload
pub const MISSING_CONTENT: &str = "<p>Content not available.</p>";

/// Parse an ordered section list from a JSON array of `{label, content}`
pub fn load_sections(json: &str) -> Result<Vec<BlockSpec>, serde_json::Error> {
    let sections: Vec<BlockSpec> = serde_json::from_str(json)?;
    log::info!("Loaded {} portfolio sections", sections.len());
    Ok(sections)
}

/// Built-in sections used when the page supplies none
pub fn sample_sections() -> Vec<BlockSpec> {
    vec![
        BlockSpec::new(
            "Summary",
            "<h2>Professional Summary</h2>\
             <p>Developer with a background in agile delivery, documentation and systems work.</p>",
        ),
        BlockSpec::new(
            "Experience",
            "<h2>Experience</h2>\
             <h3>Project Manager &amp; Developer</h3>\
             <ul><li>Functional analysis, Dart and Firebase development.</li>\
             <li>Stakeholder collaboration and database design.</li></ul>\
             <h3>CAD Designer</h3>\
             <ul><li>3D CAD modelling and technical documentation.</li></ul>",
        ),
        BlockSpec::new(
            "Education",
            "<h2>Education</h2>\
             <ul><li><strong>B.Sc.</strong> Systems Engineering</li>\
             <li><strong>Scrum Fundamentals</strong> certification</li></ul>",
        ),
        BlockSpec::new(
            "Languages",
            "<h2>Languages</h2><ul><li>English (B2)</li><li>Spanish (native)</li></ul>",
        ),
        BlockSpec::new(
            "Skills",
            "<h2>Technical Skills</h2>\
             <ul><li>Java, C#, Dart, PHP, HTML/CSS, React</li>\
             <li>Firebase, MySQL, Oracle</li><li>Docker, GitHub, ASP.NET</li></ul>",
        ),
        BlockSpec::new(
            "Contact",
            "<h2>Contact</h2><p>Use the links in the header to get in touch.</p>",
        ),
    ]
}
