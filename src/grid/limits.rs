use crate::foundation::core::Resolution;

/// Outcome of [`validate_scene_count`]. Advisory: neither the solver nor the splitter enforce it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneCountCheck {
    pub is_valid: bool,
    /// Scene cap of the checked resolution.
    pub limit: u32,
    /// Explanation when `is_valid` is `false`.
    pub message: Option<String>,
}

/// Check `scene_count` against the per-resolution scene cap.
pub fn validate_scene_count(scene_count: u32, resolution: Resolution) -> SceneCountCheck {
    let limit = resolution.scene_limit();

    let message = if scene_count == 0 {
        Some("At least one scene is required".to_string())
    } else if scene_count > limit {
        let hint = match higher_tier_for(scene_count, resolution) {
            Some(higher) => format!(
                "Switch to {higher} (up to {} scenes) or reduce the scene count.",
                higher.scene_limit()
            ),
            None => "Reduce the scene count.".to_string(),
        };
        Some(format!(
            "Scene count {scene_count} exceeds the {resolution} limit of {limit} scenes. {hint}"
        ))
    } else {
        None
    };

    if let Some(msg) = &message {
        tracing::debug!(scene_count, %resolution, "{msg}");
    }

    SceneCountCheck {
        is_valid: message.is_none(),
        limit,
        message,
    }
}

/// Lowest resolution whose scene cap admits `scene_count`; the highest tier when none does.
pub fn recommended_resolution(scene_count: u32) -> Resolution {
    Resolution::ALL
        .into_iter()
        .find(|r| scene_count <= r.scene_limit())
        .unwrap_or(Resolution::FourK)
}

fn higher_tier_for(scene_count: u32, current: Resolution) -> Option<Resolution> {
    Resolution::ALL
        .into_iter()
        .find(|r| *r > current && scene_count <= r.scene_limit())
}

#[cfg(test)]
#[path = "../../tests/unit/grid/limits.rs"]
mod tests;
