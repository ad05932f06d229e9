//! Face resolution.
//!
//! Maps the unbounded rotation angle back to the item list. The angle is
//! normalized into one revolution to find the facing sector, but the
//! revolution count is folded into a face-seen counter first, so dragging
//! through multiple full turns keeps advancing through the whole item list
//! instead of resetting every 2π.

use std::f32::consts::TAU;

/// Physical cube faces. Lateral faces carry baked textures; Top and Bottom
/// stay on the placeholder material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Right,
    Back,
    Left,
    Top,
    Bottom,
}

/// Lateral face under the viewer for a normalized-angle sector, under the
/// convention that rightward drag increases the angle and spins the cube
/// counterclockwise seen from above: front, then left, back, right.
pub fn sector_face(sector: u32, faces_per_revolution: u32) -> Face {
    match sector % faces_per_revolution.max(1) {
        0 => Face::Front,
        1 => Face::Left,
        2 => Face::Back,
        _ => Face::Right,
    }
}

/// Sector of the normalized angle, in `[0, faces_per_revolution)`.
///
/// Boundaries are closed-open: a value exactly on a boundary belongs to the
/// upper sector. Float spill at exactly 2π is clamped back to the last
/// sector.
fn sector_of(norm: f32, faces_per_revolution: u32) -> u32 {
    let delta = TAU / faces_per_revolution as f32;
    ((norm / delta) as u32).min(faces_per_revolution - 1)
}

/// Resolve the selected item index for a rotation angle.
///
/// Returns `None` only for an empty item list. The result is always in
/// `[0, item_count)` regardless of drag direction or revolution count.
pub fn resolve_index(current_angle: f32, item_count: usize, faces_per_revolution: u32) -> Option<usize> {
    if item_count == 0 || faces_per_revolution == 0 {
        return None;
    }

    let norm = ((current_angle % TAU) + TAU) % TAU;
    let face_index = sector_of(norm, faces_per_revolution) as i64;

    let total_revolutions = (current_angle.abs() / TAU).floor() as i64;
    // Zero counts as positive
    let direction: i64 = if current_angle < 0.0 { -1 } else { 1 };

    let seen = total_revolutions * faces_per_revolution as i64 * direction + face_index;
    let n = item_count as i64;
    let item_index = ((seen % n) + n) % n;

    Some(item_index as usize)
}

/// Destination URL for a resolved item link.
///
/// An empty link yields `None` (click is a no-op). Links that already carry
/// a scheme or an absolute path pass through; anything else gets the
/// configured base path prepended.
pub fn destination_url(link: &str, base_path: &str) -> Option<String> {
    if link.is_empty() {
        return None;
    }
    if link.starts_with("http://") || link.starts_with("https://") || link.starts_with('/') {
        return Some(link.to_string());
    }
    Some(format!("{}{}", base_path, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn empty_item_list_resolves_to_none() {
        assert_eq!(resolve_index(1.0, 0, 4), None);
    }

    #[test]
    fn nonempty_list_always_resolves_in_range() {
        for &n in &[1usize, 2, 3, 4, 5, 7] {
            for &f in &[3u32, 4] {
                let mut angle = -50.0f32;
                while angle < 50.0 {
                    let idx = resolve_index(angle, n, f).expect("must resolve");
                    assert!(idx < n, "angle {} n {} f {} gave {}", angle, n, f, idx);
                    angle += 0.37;
                }
            }
        }
    }

    #[test]
    fn zero_angle_selects_first_item() {
        for &f in &[3u32, 4] {
            assert_eq!(resolve_index(0.0, 5, f), Some(0));
        }
    }

    #[test]
    fn boundary_belongs_to_upper_sector() {
        // Exactly one sector in: face index 1
        let delta = TAU / 4.0;
        assert_eq!(resolve_index(delta, 4, 4), Some(1));
    }

    #[test]
    fn advances_one_step_per_sector_crossing() {
        let n = 5usize;
        let f = 4u32;
        let delta = TAU / f as f32;
        let mut last = resolve_index(0.01, n, f).unwrap();
        for k in 1..16 {
            let angle = 0.01 + k as f32 * delta;
            let idx = resolve_index(angle, n, f).unwrap();
            assert_eq!(idx, (last + 1) % n, "crossing {}", k);
            last = idx;
        }
    }

    #[test]
    fn full_revolution_shifts_by_face_count_mod_items() {
        let n = 5usize;
        let f = 4u32;
        let base = resolve_index(0.3, n, f).unwrap();
        let after = resolve_index(0.3 + TAU, n, f).unwrap();
        assert_eq!(after, (base + f as usize) % n);
    }

    #[test]
    fn four_items_four_faces_scenario() {
        // The end-to-end sequence from the reference behavior
        assert_eq!(resolve_index(0.0, 4, 4), Some(0));
        assert_eq!(resolve_index(PI / 2.0 + 0.01, 4, 4), Some(1));
        // One extra full revolution: 4 mod 4 == 0 shift
        assert_eq!(resolve_index(TAU + PI / 2.0 + 0.01, 4, 4), Some(1));
    }

    #[test]
    fn three_items_three_faces_scenario() {
        // 4π/3 lies in the third sector
        assert_eq!(resolve_index(4.0 * PI / 3.0, 3, 3), Some(2));
    }

    #[test]
    fn negative_angles_resolve_in_range() {
        let n = 4usize;
        for k in 1..20 {
            let angle = -0.4 * k as f32;
            let idx = resolve_index(angle, n, 4).expect("must resolve");
            assert!(idx < n);
        }
    }

    #[test]
    fn sector_face_convention() {
        assert_eq!(sector_face(0, 4), Face::Front);
        assert_eq!(sector_face(1, 4), Face::Left);
        assert_eq!(sector_face(2, 4), Face::Back);
        assert_eq!(sector_face(3, 4), Face::Right);
    }

    #[test]
    fn destination_prefixes_bare_slugs_only() {
        assert_eq!(destination_url("", "/listings/"), None);
        assert_eq!(
            destination_url("my-flat", "/listings/").as_deref(),
            Some("/listings/my-flat")
        );
        assert_eq!(
            destination_url("/about", "/listings/").as_deref(),
            Some("/about")
        );
        assert_eq!(
            destination_url("https://example.com/x", "/listings/").as_deref(),
            Some("https://example.com/x")
        );
    }
}
