//! Distance command handler

use crate::coord::distance::haversine_km;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use clap::Args;

/// Distance command arguments
#[derive(Args)]
pub struct DistanceArgs {
    /// First point as LAT,LNG
    #[arg(allow_hyphen_values = true)]
    pub from: String,

    /// Second point as LAT,LNG
    #[arg(allow_hyphen_values = true)]
    pub to: String,
}

fn parse_point(s: &str) -> Result<Coordinates> {
    let coords: Coordinates = s.parse().map_err(Error::InvalidCoordinates)?;
    coords.validate()?;
    Ok(coords)
}

/// Run the distance command
pub fn run(args: DistanceArgs) -> Result<()> {
    let from = parse_point(&args.from)?;
    let to = parse_point(&args.to)?;

    println!("{:.3} km", haversine_km(from, to));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let p = parse_point("48.8566, 2.3522").unwrap();
        assert_eq!(p, Coordinates::new(48.8566, 2.3522));
        assert!(parse_point("-33.86,151.2").is_ok());
        assert!(matches!(
            parse_point("95,0"),
            Err(Error::InvalidCoordinates(_))
        ));
        assert!(matches!(
            parse_point("paris"),
            Err(Error::InvalidCoordinates(_))
        ));
    }
}
