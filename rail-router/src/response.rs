//! Human-readable route descriptions.

use crate::planner::Route;

/// Render a route as the text shown to the user.
///
/// ```text
/// Travel from Pasir Ris to Simei during peak hours
/// Time: 37 minutes
/// Route: [EW1, EW2, NS4, NS5]
///
/// Take EW line from Pasir Ris to Tampines
/// Change from EW line to NS line
/// Take NS line from Tampines to Simei
/// ```
pub fn render(route: &Route) -> String {
    let stations = route.stations();
    let (Some(first), Some(last)) = (stations.first(), stations.last()) else {
        return String::new();
    };

    let codes: Vec<String> = stations.iter().map(|s| s.code.to_string()).collect();

    let mut lines = vec![
        format!(
            "Travel from {} to {} during {} hours",
            first.name,
            last.name,
            route.time_of_day()
        ),
        format!("Time: {} minutes", route.minutes()),
        format!("Route: [{}]", codes.join(", ")),
        String::new(),
    ];

    lines.extend(stations.windows(2).map(|pair| {
        let (from, to) = (&pair[0], &pair[1]);
        if from.is_interchange_with(to) {
            format!("Change from {} line to {} line", from.line(), to.line())
        } else {
            format!("Take {} line from {} to {}", from.line(), from.name, to.name)
        }
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Station, StationCode, StationId, TimeOfDay};
    use chrono::NaiveDate;

    fn station(id: usize, code: &str, name: &str) -> Station {
        let opened = NaiveDate::from_ymd_opt(2021, 2, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Station::new(StationId(id), StationCode::parse(code).unwrap(), name, opened)
    }

    #[test]
    fn without_line_change() {
        let route = Route::new(
            100,
            vec![
                station(0, "EW1", "Pasir Ris"),
                station(1, "EW2", "Tampines"),
                station(2, "EW4", "Simei"),
            ],
            TimeOfDay::Peak,
        );
        assert_eq!(
            render(&route),
            "Travel from Pasir Ris to Simei during peak hours\n\
             Time: 100 minutes\n\
             Route: [EW1, EW2, EW4]\n\
             \n\
             Take EW line from Pasir Ris to Tampines\n\
             Take EW line from Tampines to Simei"
        );
    }

    #[test]
    fn with_line_change() {
        let route = Route::new(
            100,
            vec![
                station(0, "EW1", "Pasir Ris"),
                station(1, "EW2", "Tampines"),
                station(2, "NS4", "Tampines"),
                station(3, "NS5", "Simei"),
            ],
            TimeOfDay::Peak,
        );
        assert_eq!(
            render(&route),
            "Travel from Pasir Ris to Simei during peak hours\n\
             Time: 100 minutes\n\
             Route: [EW1, EW2, NS4, NS5]\n\
             \n\
             Take EW line from Pasir Ris to Tampines\n\
             Change from EW line to NS line\n\
             Take NS line from Tampines to Simei"
        );
    }

    #[test]
    fn same_name_on_one_line_is_not_a_change() {
        let route = Route::new(
            4,
            vec![station(0, "AA1", "Twin"), station(1, "AA2", "Twin")],
            TimeOfDay::Peak,
        );
        assert_eq!(
            render(&route),
            "Travel from Twin to Twin during peak hours\n\
             Time: 4 minutes\n\
             Route: [AA1, AA2]\n\
             \n\
             Take AA line from Twin to Twin"
        );
        assert_eq!(route.change_count(), 0);
    }

    #[test]
    fn single_station() {
        let route = Route::new(0, vec![station(0, "NE3", "Hougang")], TimeOfDay::NonPeak);
        assert_eq!(
            render(&route),
            "Travel from Hougang to Hougang during non-peak hours\n\
             Time: 0 minutes\n\
             Route: [NE3]\n"
        );
    }

    #[test]
    fn empty_route() {
        let route = Route::new(0, Vec::new(), TimeOfDay::Night);
        assert_eq!(render(&route), "");
    }
}
