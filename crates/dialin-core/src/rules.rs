/// Recipe rules — single source of truth for the output format and domain
/// constraints every recipe prompt carries.
pub const RULES: &str = "\
- Output ONLY JSON (no markdown) as a single object.\n\
- The object must include: name, summary, espressoOz, milkOz, waterOz, shotType, steps (array of strings).\n\
- Use oz/fl oz for liquids in both the summary and steps. Example: \"2 oz espresso\" or \"6 fl oz milk\".\n\
- If milkOz is 0, do not include any milk steaming steps or latte art steps.\n\
- If milk is used and milkCapability is \"steam wand\", say \"steam to create microfoam\" (avoid the word \"froth\") \
and include timing guidance (seconds) for steaming with the wand.\n\
- If milk is used and milkCapability is \"auto milk\", use automatic milk program steps only (no manual steaming).\n\
- If the machine is \"DeLonghi Magnifica Evo (non-LatteCrema)\", do NOT mention grinding. Choose single vs double \
shot based on espresso volume (<=1.5 oz = single, >1.5 oz = double). Include specific brew instructions for the super-auto.\n\
- Keep steps concise, sequential, and practical.\n\
- If latte art is requested, add steps that cover pitcher technique, stretching/texturing, when to start pouring, \
swirling/tapping to integrate microfoam, and the art pour. Only include latte art steps when requested.\n";

/// Espresso volume (oz) at or below which a single shot is pulled.
pub const SINGLE_SHOT_MAX_OZ: f64 = 1.5;

/// Instruction paired with every recipe prompt.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a precise barista recipe generator. Return only valid JSON.";
