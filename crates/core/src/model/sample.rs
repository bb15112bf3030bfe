//! Built-in photosynthesis material used when no catalog is supplied.

use crate::error::Error;
use crate::model::card::{Card, Difficulty};
use crate::model::catalog::Catalog;
use crate::model::ids::{CardId, QuestionId};
use crate::model::material::{ConceptExplanation, MaterialLevel, StudyMaterial};
use crate::model::question::Question;
use crate::model::study_set::StudySet;

pub const SAMPLE_TOPIC: &str = "Photosynthesis";

const SAMPLE_SUMMARY: &str = "\
Photosynthesis is the process by which green plants and some other organisms use sunlight to \
synthesize foods with the help of chlorophyll. This complex process converts carbon dioxide and \
water into glucose and oxygen using solar energy.

Key Components:
• Chloroplasts: The organelles where photosynthesis occurs
• Chlorophyll: The green pigment that captures light energy
• Carbon dioxide: Absorbed from the atmosphere through stomata
• Water: Absorbed by roots from the soil

The Process:
1. Light Reaction (Photo-dependent): Occurs in the thylakoids of chloroplasts
2. Dark Reaction (Light-independent): Takes place in the stroma of chloroplasts

Chemical Equation:
6CO₂ + 6H₂O + Light Energy → C₆H₁₂O₆ + 6O₂

Importance:
- Produces oxygen essential for life
- Converts solar energy into chemical energy
- Forms the basis of most food chains
- Helps regulate atmospheric CO₂ levels";

/// # Errors
///
/// Only fails if the built-in data is edited into an invalid state.
pub fn sample_material() -> Result<StudyMaterial, Error> {
    let concepts = vec![
        ConceptExplanation::new(
            "Chlorophyll",
            "Think of chlorophyll as tiny solar panels in plants. Just like solar panels capture \
sunlight to make electricity, chlorophyll captures sunlight to make food for the plant.",
        )
        .with_icon("🌱"),
        ConceptExplanation::new(
            "Light vs Dark Reactions",
            "Light reactions are like charging a battery with sunlight, while dark reactions are \
like using that charged battery to build something useful (glucose).",
        )
        .with_icon("⚡"),
        ConceptExplanation::new(
            "Stomata",
            "Stomata are like tiny mouths on leaves that open and close to let gases in and out: \
breathing holes for plants!",
        )
        .with_icon("👃"),
    ];
    Ok(StudyMaterial::new(
        SAMPLE_SUMMARY,
        [
            "Photosynthesis occurs in chloroplasts",
            "Requires sunlight, water, and carbon dioxide",
            "Produces glucose and oxygen",
            "Essential for life on Earth",
        ],
        concepts,
        MaterialLevel::Intermediate,
    )?)
}

/// # Errors
///
/// Only fails if the built-in data is edited into an invalid state.
pub fn sample_cards() -> Result<Catalog<Card>, Error> {
    let cards = vec![
        Card::new(
            CardId::new(1),
            "What is photosynthesis?",
            "The process by which green plants use sunlight to synthesize food from carbon dioxide and water, producing oxygen as a byproduct.",
            Difficulty::Easy,
        )?,
        Card::new(
            CardId::new(2),
            "Where does photosynthesis occur in plant cells?",
            "In chloroplasts: the thylakoids host the light reactions and the stroma hosts the dark reactions.",
            Difficulty::Medium,
        )?,
        Card::new(
            CardId::new(3),
            "What is the chemical equation for photosynthesis?",
            "6CO₂ + 6H₂O + Light Energy → C₆H₁₂O₆ + 6O₂",
            Difficulty::Hard,
        )?,
        Card::new(
            CardId::new(4),
            "What are the two main stages of photosynthesis?",
            "1. Light-dependent reactions (thylakoids)\n2. Light-independent reactions, the Calvin cycle (stroma)",
            Difficulty::Medium,
        )?,
        Card::new(
            CardId::new(5),
            "What is chlorophyll?",
            "A green pigment in chloroplasts that absorbs light energy, mostly red and blue wavelengths.",
            Difficulty::Easy,
        )?,
    ];
    Ok(Catalog::new(cards)?)
}

/// # Errors
///
/// Only fails if the built-in data is edited into an invalid state.
pub fn sample_questions() -> Result<Catalog<Question>, Error> {
    let questions = vec![
        Question::multiple_choice(
            QuestionId::new(1),
            "What is the primary function of chlorophyll in photosynthesis?",
            [
                "To absorb carbon dioxide",
                "To absorb light energy",
                "To release oxygen",
                "To produce glucose",
            ],
            "To absorb light energy",
            "Chlorophyll is the green pigment that captures light energy, which drives the whole process.",
        )?,
        Question::true_false(
            QuestionId::new(2),
            "Photosynthesis only occurs during the day.",
            false,
            "The light-dependent reactions need sunlight, but the Calvin cycle runs whenever ATP and NADPH are available.",
        )?,
        Question::multiple_choice(
            QuestionId::new(3),
            "Which of the following is NOT a product of photosynthesis?",
            ["Glucose", "Oxygen", "Carbon dioxide", "Water (in some reactions)"],
            "Carbon dioxide",
            "Carbon dioxide is a reactant, not a product. The products are glucose and oxygen.",
        )?,
        Question::open_ended(
            QuestionId::new(4),
            "Explain the difference between light-dependent and light-independent reactions in photosynthesis.",
            "Light-dependent reactions occur in thylakoids and require sunlight to produce ATP and NADPH. Light-independent reactions (Calvin cycle) occur in stroma and use ATP and NADPH to convert CO2 into glucose.",
            "The two stages differ in where they happen and in what they consume and produce.",
        )?,
        Question::true_false(
            QuestionId::new(5),
            "All parts of a plant can perform photosynthesis.",
            false,
            "Only parts with chloroplasts (mainly leaves and green stems) photosynthesize. Roots do not.",
        )?,
    ];
    Ok(Catalog::new(questions)?)
}

/// # Errors
///
/// Only fails if the built-in data is edited into an invalid state.
pub fn sample_study_set() -> Result<StudySet, Error> {
    Ok(StudySet::new(SAMPLE_TOPIC, sample_cards()?, sample_questions()?)
        .with_material(sample_material()?))
}
