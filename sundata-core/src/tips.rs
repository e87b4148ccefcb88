//! Photography tips keyed by lighting condition.

use crate::lighting::LightingCondition;

pub const DEFAULT_TIP: &str = "Adjust settings based on available light and subject matter.";

/// Tip for a lighting condition; conditions without their own entry get [`DEFAULT_TIP`].
pub fn tip_for(condition: LightingCondition) -> &'static str {
    match condition {
        LightingCondition::MorningGoldenHour => {
            "Soft, warm light perfect for landscapes and portraits. Use a low ISO and wide aperture."
        }
        LightingCondition::EveningGoldenHour => {
            "Beautiful warm tones. Great for silhouettes and backlit subjects."
        }
        LightingCondition::MorningBlueHour => {
            "Cool blue tones. Ideal for city scenes and architecture. Use a tripod for longer exposures."
        }
        LightingCondition::EveningBlueHour => {
            "Soft blue light mixed with artificial lights. Great for cityscapes."
        }
        LightingCondition::Night => {
            "Use a tripod and long exposures. Consider light painting or astrophotography."
        }
        LightingCondition::Sunny => {
            "High contrast. Use a polarizing filter and watch for harsh shadows."
        }
        LightingCondition::Overcast => {
            "Soft, diffused light. Great for portraits and reducing harsh shadows."
        }
        LightingCondition::Rainy => {
            "Reflections and moody scenes. Protect your gear and look for interesting water effects."
        }
        LightingCondition::Foggy => {
            "Atmospheric and moody. Use manual focus and look for isolated subjects."
        }
        LightingCondition::Snowy => {
            "High brightness. Adjust exposure compensation and watch for blue tones in shadows."
        }
        LightingCondition::MistyMorning => {
            "Ethereal scenes. Look for layered landscapes and use a telephoto lens."
        }
        LightingCondition::Dawn => "Soft, cool light. Great for landscapes and nature photography.",
        LightingCondition::Dusk => "Warm, fading light. Perfect for skylines and dramatic landscapes.",
        LightingCondition::Misty | LightingCondition::NormalDaylight => DEFAULT_TIP,
    }
}

/// Tip looked up by exact display name, e.g. `"Misty Morning"`. Anything else gets [`DEFAULT_TIP`].
pub fn tip_for_name(name: &str) -> &'static str {
    LightingCondition::all()
        .iter()
        .find(|c| c.name() == name)
        .map_or(DEFAULT_TIP, |c| tip_for(*c))
}
