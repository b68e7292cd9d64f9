//! Fixed copy sent to, or shown alongside, the backend.

/// Persona attached to every chat request.
pub const SYSTEM_INSTRUCTION: &str = "\
You are 'EverGreen AI', a friendly and professional landscaping consultant for 'EverGreen Landscapes'.
Your goals:
1. Provide expert advice on garden design, plant choice, and lawn care.
2. Briefly mention our services: Hardscaping, Garden Design, Seasonal Maintenance, and Smart Irrigation.
3. Encourage users to 'Visualize' their ideas using our built-in tool.
4. If users ask about pricing, explain it depends on scale but offer typical ballpark ranges.
5. Stay professional, nature-focused, and helpful. Keep responses concise but insightful.";

/// First assistant message of every chat.
pub const GREETING: &str = "Hello! I'm EverGreen AI. How can I help you with your outdoor space \
today? I can offer plant advice, design tips, or help you book a service.";

/// Ready-made visualizer descriptions.
pub const VISUALIZER_PRESETS: [&str; 4] = [
    "English cottage garden with lavender and roses",
    "Modern Japanese Zen garden with a stone pagoda",
    "Desert xeriscape with succulents and decorative gravel",
    "Mediterranean patio with olive trees and terracotta",
];

/// Wrap a raw description in the photorealistic landscaping template.
pub fn visual_prompt(description: &str) -> String {
    format!(
        "A photorealistic, high-end professional landscaping design of: {description}. \
         Professional photography, lush greenery, perfect lighting, 4k resolution."
    )
}
