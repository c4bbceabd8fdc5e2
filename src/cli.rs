//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use domeshed::{validate_pitch, StructureParameters};

/// Solve and draw a dome shed for a given roof pitch.
///
/// With `--angle` the drawing is written to disk and a report is printed; without it
/// an interactive pitch slider runs in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Roof pitch in degrees, strictly between 0 and 90
    #[arg(short, long, value_parser = parse_pitch)]
    pub angle: Option<f64>,

    /// PNG output path [default: hideout-<angle>deg.png]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the drawing as SVG
    #[arg(long)]
    pub svg: Option<PathBuf>,

    /// Also write the solved geometry as JSON
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 2200)]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Log debug diagnostics to standard error
    #[arg(short, long)]
    pub verbose: bool,

    /// Left (tall) wall height in feet
    #[arg(long)]
    pub left_wall: Option<f64>,

    /// Right post height in feet
    #[arg(long)]
    pub post: Option<f64>,

    /// Interior wall height in feet
    #[arg(long)]
    pub interior_wall: Option<f64>,

    /// Back wall length in feet
    #[arg(long)]
    pub back_wall: Option<f64>,

    /// Dome radius in feet
    #[arg(long)]
    pub dome_radius: Option<f64>,

    /// Angle of the wing connection on the dome, degrees from +x
    #[arg(long, allow_hyphen_values = true)]
    pub connection_angle: Option<f64>,

    /// Heading of the back wall, degrees from +x
    #[arg(long, allow_hyphen_values = true)]
    pub wall_angle: Option<f64>,

    /// Half width of the front entry in feet
    #[arg(long)]
    pub entry_half_width: Option<f64>,

    /// Depth of the front entry in feet
    #[arg(long)]
    pub entry_depth: Option<f64>,
}

impl Args {
    /// Structure parameters with every override applied on top of the defaults.
    ///
    /// The pitch comes from `--angle` when given and otherwise stays at the default.
    pub fn to_parameters(&self) -> StructureParameters {
        let defaults = StructureParameters::default();
        let parameters = defaults
            .with_heights(
                self.left_wall.unwrap_or(defaults.left_wall_height),
                self.post.unwrap_or(defaults.right_post_height),
                self.interior_wall.unwrap_or(defaults.interior_wall_height),
            )
            .with_back_wall_length(self.back_wall.unwrap_or(defaults.back_wall_length))
            .with_dome_radius(self.dome_radius.unwrap_or(defaults.dome_radius))
            .with_wing_angles(
                self.connection_angle
                    .unwrap_or(defaults.connection_angle_degrees),
                self.wall_angle.unwrap_or(defaults.wall_angle_degrees),
            )
            .with_entry(
                self.entry_half_width.unwrap_or(defaults.entry_half_width),
                self.entry_depth.unwrap_or(defaults.entry_depth),
            );
        match self.angle {
            Some(angle) => parameters.with_roof_pitch(angle),
            None => parameters,
        }
    }
}

/// Parse a roof pitch and reject angles the trigonometry cannot handle.
fn parse_pitch(value: &str) -> Result<f64, String> {
    let pitch: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    validate_pitch(pitch).map_err(|error| error.to_string())?;
    Ok(pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_must_lie_strictly_inside_right_angle() {
        assert_eq!(parse_pitch("22.5"), Ok(22.5));
        assert!(parse_pitch("0").is_err());
        assert!(parse_pitch("90").is_err());
        assert!(parse_pitch("-10").is_err());
        assert!(parse_pitch("steep").is_err());
    }

    #[test]
    fn overrides_replace_defaults() {
        let args = Args::parse_from([
            "domeshed",
            "--angle",
            "30",
            "--dome-radius",
            "18",
            "--wall-angle",
            "-30",
        ]);
        let parameters = args.to_parameters();
        assert_eq!(parameters.roof_pitch_degrees, 30.0);
        assert_eq!(parameters.dome_radius, 18.0);
        assert_eq!(parameters.wall_angle_degrees, -30.0);
        assert_eq!(
            parameters.left_wall_height,
            StructureParameters::default().left_wall_height
        );
    }

    #[test]
    fn entry_can_be_narrowed_for_a_small_dome() {
        let args = Args::parse_from([
            "domeshed",
            "--dome-radius",
            "4",
            "--entry-half-width",
            "2.5",
            "--entry-depth",
            "3",
        ]);
        let parameters = args.to_parameters();
        assert_eq!(parameters.entry_half_width, 2.5);
        assert_eq!(parameters.entry_depth, 3.0);
        assert!(parameters.validate().is_ok());
    }

    #[test]
    fn no_angle_means_interactive() {
        let args = Args::parse_from(["domeshed"]);
        assert!(args.angle.is_none());
        assert_eq!((args.width, args.height), (2200, 1000));
    }

    #[test]
    fn out_of_range_angle_is_rejected_at_parse_time() {
        assert!(Args::try_parse_from(["domeshed", "--angle", "95"]).is_err());
    }
}
