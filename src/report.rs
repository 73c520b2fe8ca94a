//! Derived statistics handed to the chart layer. Nothing in here renders;
//! every function is a read-only pass over aggregated entities.

use log::debug;
use rust_decimal::Decimal;

use crate::codes::{self, AGE_ORDER, AGGREGATE_TERRITORY, PURPOSE_ORDER, TOTAL_CODE};
use crate::survey::{is_excluded_purpose, AgeGender, PurposeTracker, Territory};

/// Room left above the tallest bar.
const Y_AXIS_HEADROOM: u32 = 5;

/// Uppercase letters of a territory name, used as the short axis label
/// (`Gran Canaria - Sur` -> `GCS`).
pub fn territory_abbreviation(name: &str) -> String {
    name.chars().filter(|c| c.is_uppercase()).collect()
}

/// Highest substantive percentage across all territories. Gives a shared
/// y-axis limit when several territory charts are compared.
pub fn highest_percentage(territories: &[Territory]) -> Option<Decimal> {
    territories.iter().filter_map(Territory::highest_percentage).max()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurposeAverage {
    pub purpose: &'static str,
    pub abbreviation: &'static str,
    pub average: Option<Decimal>,
    pub samples: usize,
}

/// Mean percentage of every substantive purpose over the territories that
/// recorded one. Unknown percentages are left out of the mean.
pub fn purpose_averages(territories: &[Territory]) -> Vec<PurposeAverage> {
    codes::PURPOSES
        .into_iter()
        .filter(|(purpose, _)| !is_excluded_purpose(purpose))
        .map(|(purpose, abbreviation)| {
            let values: Vec<Decimal> = territories
                .iter()
                .filter_map(|territory| territory.purposes().percentage(purpose))
                .collect();

            let average = if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<Decimal>() / Decimal::from(values.len()))
            };

            PurposeAverage {
                purpose,
                abbreviation,
                average,
                samples: values.len(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// Every purpose chart uses the highest percentage of any territory, so
    /// charts can be compared side by side.
    Shared,
    /// Each purpose chart is scaled to its own tallest bar.
    PerPurpose,
}

/// One bar chart: the percentage of a purpose in every territory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurposeBars {
    pub purpose: &'static str,
    pub abbreviation: &'static str,
    pub territories: Vec<String>,
    pub percentages: Vec<Option<Decimal>>,
    pub y_limit: Option<Decimal>,
}

/// Bars per substantive purpose, territories in input order and labelled by
/// their abbreviation.
pub fn territory_bars(territories: &[Territory], y_axis: YAxis) -> Vec<PurposeBars> {
    let labels: Vec<String> = territories.iter().map(|t| territory_abbreviation(t.name())).collect();
    let shared_limit = highest_percentage(territories);

    codes::PURPOSES
        .into_iter()
        .filter(|(purpose, _)| !is_excluded_purpose(purpose))
        .map(|(purpose, abbreviation)| {
            let percentages: Vec<Option<Decimal>> = territories
                .iter()
                .map(|territory| territory.purposes().percentage(purpose))
                .collect();

            let tallest = match y_axis {
                YAxis::Shared => shared_limit,
                YAxis::PerPurpose => percentages.iter().flatten().max().copied(),
            };

            PurposeBars {
                purpose,
                abbreviation,
                territories: labels.clone(),
                percentages,
                y_limit: tallest.map(|tallest| tallest + Decimal::from(Y_AXIS_HEADROOM)),
            }
        })
        .collect()
}

/// Territory by purpose grid. `cells[row][column]` is the percentage of
/// `purposes[row]` in `territories[column]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentageMatrix {
    pub purposes: Vec<&'static str>,
    pub territories: Vec<String>,
    pub cells: Vec<Vec<Option<Decimal>>>,
}

impl PercentageMatrix {
    pub fn get(&self, purpose: &str, territory: &str) -> Option<Decimal> {
        let row = self.purposes.iter().position(|p| *p == purpose)?;
        let column = self.territories.iter().position(|t| t == territory)?;
        self.cells[row][column]
    }
}

pub fn percentage_matrix(territories: &[Territory]) -> PercentageMatrix {
    let purposes: Vec<&'static str> = codes::substantive_purposes().collect();
    let cells: Vec<Vec<Option<Decimal>>> = purposes
        .iter()
        .map(|purpose| {
            territories
                .iter()
                .map(|territory| territory.purposes().percentage(purpose))
                .collect()
        })
        .collect();

    PercentageMatrix {
        purposes,
        territories: territories.iter().map(|t| t.name().clone()).collect(),
        cells,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Substantive purpose abbreviation and its percentage, in table order.
    pub percentages: Vec<(&'static str, Option<Decimal>)>,
}

/// Map markers for every territory with known coordinates. The archipelago
/// aggregate and unmapped territories are left out.
pub fn map_points(territories: &[Territory]) -> Vec<MapPoint> {
    territories
        .iter()
        .filter(|territory| territory.name() != AGGREGATE_TERRITORY)
        .filter_map(|territory| {
            let Some((latitude, longitude)) = codes::territory_coordinates(territory.name()) else {
                debug!("no coordinates for territory, name={}", territory.name());
                return None;
            };

            let percentages: Vec<(&'static str, Option<Decimal>)> = codes::PURPOSES
                .into_iter()
                .filter(|(purpose, _)| !is_excluded_purpose(purpose))
                .map(|(purpose, abbreviation)| (abbreviation, territory.purposes().percentage(purpose)))
                .collect();

            Some(MapPoint {
                name: territory.name().clone(),
                latitude,
                longitude,
                percentages,
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesFilter {
    /// Keep only the gender total instead of the per-gender groups.
    pub show_total: bool,
    /// Drop the all-ages group.
    pub show_only_ages: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub age: String,
    pub gender: String,
    pub purpose: String,
    pub percentage: Decimal,
}

impl SeriesPoint {
    pub fn age_label(&self) -> &str {
        match codes::age_label(&self.age) {
            Some(label) => label,
            None => &self.age,
        }
    }

    pub fn gender_label(&self) -> &str {
        match codes::gender_label(&self.gender) {
            Some(label) => label,
            None => &self.gender,
        }
    }
}

/// Percentages by age, gender and purpose, ordered by age group and then by
/// purpose display order.
pub fn age_gender_series(groups: &[AgeGender], filter: SeriesFilter) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = groups
        .iter()
        .filter(|group| {
            if filter.show_total {
                group.gender() == TOTAL_CODE
            } else {
                group.gender() == "F" || group.gender() == "M"
            }
        })
        .filter(|group| !(filter.show_only_ages && group.age() == TOTAL_CODE))
        .flat_map(|group| {
            group
                .purposes()
                .iter()
                .filter(|(purpose, _)| !is_excluded_purpose(purpose))
                .filter_map(move |(purpose, entry)| {
                    entry.percentage().map(|percentage| SeriesPoint {
                        age: group.age().clone(),
                        gender: group.gender().clone(),
                        purpose: purpose.clone(),
                        percentage,
                    })
                })
        })
        .collect();

    points.sort_by_key(|point| {
        (
            codes::order_of(&AGE_ORDER, &point.age),
            codes::order_of(&PURPOSE_ORDER, &point.purpose),
        )
    });

    points
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const MCET: &str = "MEJORAR_CALIDAD_ENTORNOS_TURISTICOS";
    const MCVC: &str = "MEJORAR_CONDICIONES_VIDA_CANARIAS";
    const CFSC: &str = "CUALQUIER_FIN_SERVICIO_CANARIAS";

    fn territory(name: &str, percentages: &[(&str, Decimal)]) -> Territory {
        let mut territory = Territory::new(name);
        for (purpose, percentage) in percentages {
            territory.update_purpose(purpose, None, Some(*percentage));
        }
        territory
    }

    fn group(age: &str, gender: &str, percentages: &[(&str, Decimal)]) -> AgeGender {
        let mut group = AgeGender::new(age, gender);
        for (purpose, percentage) in percentages {
            group.update_purpose(purpose, None, Some(*percentage));
        }
        group
    }

    #[test]
    fn test_territory_abbreviation() {
        assert_eq!(territory_abbreviation("Gran Canaria - Sur"), "GCS");
        assert_eq!(territory_abbreviation("Tenerife - Área Metropolitana"), "TÁM");
        assert_eq!(territory_abbreviation("lanzarote"), "");
    }

    #[test]
    fn test_highest_percentage() {
        let territories = vec![
            territory("Tenerife", &[(MCET, dec!(40)), (TOTAL_CODE, dec!(100))]),
            territory("La Palma", &[(MCVC, dec!(62.5))]),
            Territory::new("El Hierro"),
        ];

        assert_eq!(highest_percentage(&territories), Some(dec!(62.5)));
        assert_eq!(highest_percentage(&territories[2..]), None);
    }

    #[test]
    fn test_purpose_averages() {
        let territories = vec![
            territory("Tenerife", &[(MCET, dec!(40)), (MCVC, dec!(10))]),
            territory("La Palma", &[(MCET, dec!(50))]),
        ];

        let averages = purpose_averages(&territories);
        assert_eq!(averages.len(), 5);

        let mcet = averages.iter().find(|a| a.purpose == MCET).unwrap();
        assert_eq!(mcet.abbreviation, "MCET");
        assert_eq!(mcet.average, Some(dec!(45)));
        assert_eq!(mcet.samples, 2);

        let mcvc = averages.iter().find(|a| a.purpose == MCVC).unwrap();
        assert_eq!(mcvc.average, Some(dec!(10)));
        assert_eq!(mcvc.samples, 1);

        let cfsc = averages.iter().find(|a| a.purpose == CFSC).unwrap();
        assert_eq!(cfsc.average, None);
        assert_eq!(cfsc.samples, 0);
    }

    #[test]
    fn test_percentage_matrix() {
        let territories = vec![
            territory("Tenerife", &[(MCET, dec!(40))]),
            territory("La Palma", &[(MCVC, dec!(12.5))]),
        ];

        let matrix = percentage_matrix(&territories);
        assert_eq!(matrix.purposes.len(), 5);
        assert_eq!(matrix.territories, vec!["Tenerife", "La Palma"]);
        assert_eq!(matrix.cells.len(), 5);
        assert!(matrix.cells.iter().all(|row| row.len() == 2));

        assert_eq!(matrix.get(MCET, "Tenerife"), Some(dec!(40)));
        assert_eq!(matrix.get(MCVC, "La Palma"), Some(dec!(12.5)));
        assert_eq!(matrix.get(MCET, "La Palma"), None);
        assert_eq!(matrix.get(TOTAL_CODE, "Tenerife"), None);
    }

    #[test]
    fn test_age_gender_series_by_gender() {
        let groups = vec![
            group("Y_GE55", "F", &[(MCVC, dec!(20)), (MCET, dec!(21))]),
            group("Y18T34", "M", &[(MCET, dec!(30)), (TOTAL_CODE, dec!(100))]),
            group("_T", "_T", &[(MCET, dec!(25))]),
            group("_T", "F", &[(MCET, dec!(26))]),
        ];

        let series = age_gender_series(&groups, SeriesFilter::default());
        let points: Vec<(&str, &str, &str)> = series
            .iter()
            .map(|p| (p.age.as_str(), p.gender.as_str(), p.purpose.as_str()))
            .collect();

        assert_eq!(
            points,
            vec![
                ("Y18T34", "M", MCET),
                ("Y_GE55", "F", MCET),
                ("Y_GE55", "F", MCVC),
                ("_T", "F", MCET),
            ]
        );
        assert_eq!(series[0].age_label(), "18 - 34");
        assert_eq!(series[0].gender_label(), "Masculino");
    }

    #[test]
    fn test_age_gender_series_totals_only_ages() {
        let groups = vec![
            group("Y35T54", "_T", &[(MCET, dec!(33))]),
            group("_T", "_T", &[(MCET, dec!(25))]),
            group("Y35T54", "F", &[(MCET, dec!(34))]),
        ];

        let filter = SeriesFilter {
            show_total: true,
            show_only_ages: true,
        };
        let series = age_gender_series(&groups, filter);

        assert_eq!(series.len(), 1);
        assert_eq!(series[0].age, "Y35T54");
        assert_eq!(series[0].gender_label(), "Total");
        assert_eq!(series[0].percentage, dec!(33));
    }

    #[test]
    fn test_age_gender_series_skips_unknown_percentages() {
        let mut only_population = AgeGender::new("Y18T34", "F");
        only_population.update_purpose(MCET, Some(120), None);

        assert!(age_gender_series(&[only_population], SeriesFilter::default()).is_empty());
    }

    #[test]
    fn test_age_gender_series_skips_excluded_purposes() {
        let groups = vec![group("Y18T34", "F", &[("total", dec!(99)), (TOTAL_CODE, dec!(100)), (MCET, dec!(30))])];

        let series = age_gender_series(&groups, SeriesFilter::default());
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].purpose, MCET);
    }

    #[test]
    fn test_map_points() {
        let territories = vec![
            territory("Canarias", &[(MCET, dec!(44))]),
            territory("La Gomera", &[(MCET, dec!(38)), (TOTAL_CODE, dec!(100))]),
            territory("Atlántida", &[(MCET, dec!(1))]),
        ];

        let points = map_points(&territories);
        assert_eq!(points.len(), 1);

        let gomera = &points[0];
        assert_eq!(gomera.name, "La Gomera");
        assert_eq!((gomera.latitude, gomera.longitude), (28.1088, -17.1023));
        assert_eq!(gomera.percentages.len(), 5);
        assert!(gomera.percentages.contains(&("MCET", Some(dec!(38)))));
        assert!(gomera.percentages.contains(&("CFSC", None)));
        assert!(gomera.percentages.iter().all(|(abbreviation, _)| *abbreviation != "T"));
    }

    #[test]
    fn test_territory_bars_shared_axis() {
        let territories = vec![
            territory("Tenerife", &[(MCET, dec!(40)), (MCVC, dec!(10))]),
            territory("La Palma", &[(MCET, dec!(60))]),
        ];

        let bars = territory_bars(&territories, YAxis::Shared);
        assert_eq!(bars.len(), 5);
        assert!(bars.iter().all(|b| b.y_limit == Some(dec!(65))));

        let mcet = bars.iter().find(|b| b.purpose == MCET).unwrap();
        assert_eq!(mcet.territories, vec!["T", "LP"]);
        assert_eq!(mcet.percentages, vec![Some(dec!(40)), Some(dec!(60))]);
    }

    #[test]
    fn test_territory_bars_per_purpose_axis() {
        let territories = vec![
            territory("Tenerife", &[(MCET, dec!(40)), (MCVC, dec!(10))]),
            territory("La Palma", &[(MCET, dec!(60))]),
        ];

        let bars = territory_bars(&territories, YAxis::PerPurpose);

        let mcet = bars.iter().find(|b| b.purpose == MCET).unwrap();
        assert_eq!(mcet.y_limit, Some(dec!(65)));

        let mcvc = bars.iter().find(|b| b.purpose == MCVC).unwrap();
        assert_eq!(mcvc.abbreviation, "MCVC");
        assert_eq!(mcvc.percentages, vec![Some(dec!(10)), None]);
        assert_eq!(mcvc.y_limit, Some(dec!(15)));

        let cfsc = bars.iter().find(|b| b.purpose == CFSC).unwrap();
        assert_eq!(cfsc.y_limit, None);
    }
}
