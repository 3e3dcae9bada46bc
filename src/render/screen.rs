//! On-screen seating chart as an HTML fragment.

use std::fmt::Write as _;

use crate::assign::{SeatMatrix, SeatingMode};
use crate::labels::ChartLabels;
use crate::palette;

/// Width of the aisle between desk groups in paired seating
const PAIR_SPACER_PX: u32 = 20;

pub const SCREEN_STYLE: &str = r#"<style>
    .desk-grid {
        display: grid;
        gap: 10px;
        padding: 20px;
        background-color: #f4f4f9;
        border-radius: 12px;
        width: fit-content;
    }
    .desk {
        width: 120px;
        height: 58px;
        display: flex;
        align-items: center;
        justify-content: center;
        border-radius: 8px;
        font-weight: bold;
        text-align: center;
        font-size: 15px;
        padding: 4px;
        border: 2px solid #555;
    }
    .empty-desk {
        border-style: dashed;
    }
    .front-of-class {
        font-size: 1.6em;
        font-weight: 900;
        color: #2563eb;
        border: 3px solid #2563eb;
        padding: 8px 16px;
        border-radius: 12px;
        background-color: #eff6ff;
        display: inline-block;
    }
</style>
"#;

/// Grid of desks, front row first, with the podium badge above it.
pub fn render_screen(matrix: &SeatMatrix, seating: SeatingMode, labels: &ChartLabels) -> String {
    let columns = matrix.column_count();
    let spacers = match seating {
        SeatingMode::Single => 0,
        SeatingMode::Paired => (columns / 2).saturating_sub(1),
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div style="text-align:center;"><span class="front-of-class">{}</span></div>"#,
        escape(&labels.podium)
    );
    let _ = write!(
        html,
        r#"<div class="desk-grid" style="grid-template-columns: repeat({}, auto);">"#,
        columns + spacers
    );

    for row in matrix.rows() {
        for (idx, seat) in row.iter().enumerate() {
            match seat {
                Some(label) => {
                    let color = label.swatch();
                    let _ = write!(
                        html,
                        r#"<div class="desk" style="background-color:{color};border-color:{color};">{}</div>"#,
                        escape(&label.text)
                    );
                }
                None => {
                    let _ = write!(
                        html,
                        r#"<div class="desk empty-desk" style="background-color:{};color:{};">{}</div>"#,
                        palette::EMPTY_FILL,
                        palette::EMPTY_TEXT,
                        escape(&labels.empty_seat)
                    );
                }
            }

            if seating == SeatingMode::Paired && idx % 2 == 1 && idx + 1 != row.len() {
                let _ = write!(html, r#"<div style="width:{PAIR_SPACER_PX}px;"></div>"#);
            }
        }
    }

    html.push_str("</div>");
    html
}

/// Standalone HTML page wrapping [`render_screen`].
pub fn render_screen_page(
    matrix: &SeatMatrix,
    seating: SeatingMode,
    labels: &ChartLabels,
    title: &str,
) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}</head>\n<body>\n<h1>{}</h1>\n{}\n</body>\n</html>\n",
        escape(title),
        SCREEN_STYLE,
        escape(title),
        render_screen(matrix, seating, labels)
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::{assign_ordered, assign_random, Arrangement, SortOrder, StartSide};
    use crate::labels::Language;
    use crate::roster::{Gender, RosterRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn labels() -> ChartLabels {
        ChartLabels::new(
            Language::Korean,
            &Arrangement::Random {
                seating: SeatingMode::Single,
            },
        )
    }

    #[test]
    fn every_seat_becomes_a_desk() {
        let roster = vec![
            RosterRecord::new("1", "Kim", Gender::Female),
            RosterRecord::new("2", "Lee", Gender::Male),
            RosterRecord::new("3", "Park", Gender::Unspecified),
        ];
        let matrix = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        let html = render_screen(&matrix, SeatingMode::Single, &labels());

        assert_eq!(html.matches(r#"class="desk""#).count(), 3);
        assert_eq!(html.matches("empty-desk").count(), 1);
        assert!(html.contains("repeat(2, auto)"));
        assert!(html.contains("background-color:#F5B7B1"));
        assert!(html.contains("background-color:#A9CCE3"));
        assert!(html.contains(">1 Kim<"));
        assert!(html.contains("빈 자리"));
        assert!(html.contains("교탁"));
    }

    #[test]
    fn front_row_comes_first() {
        let roster = vec![
            RosterRecord::new("1", "Front", Gender::Male),
            RosterRecord::new("2", "Back", Gender::Male),
        ];
        let matrix = assign_ordered(&roster, 2, 1, SortOrder::Ascending, StartSide::Left);
        let html = render_screen(&matrix, SeatingMode::Single, &labels());
        let front = html.find("1 Front").unwrap();
        let back = html.find("2 Back").unwrap();
        assert!(front < back);
    }

    #[test]
    fn paired_rows_get_spacers_between_groups() {
        let roster: Vec<RosterRecord> = (1..=6)
            .map(|n| RosterRecord::new(n.to_string(), "", Gender::Male))
            .collect();
        let mut rng = StdRng::seed_from_u64(9);
        let matrix = assign_random(&roster, 2, 3, SeatingMode::Paired, &mut rng);
        let html = render_screen(&matrix, SeatingMode::Paired, &labels());

        // 6 columns + 2 spacers per row, 2 rows
        assert!(html.contains("repeat(8, auto)"));
        assert_eq!(html.matches("width:20px;").count(), 4);
    }

    #[test]
    fn labels_are_escaped() {
        let roster = vec![RosterRecord::new("1", "<b>Kim</b>", Gender::Female)];
        let matrix = assign_ordered(&roster, 2, 2, SortOrder::Ascending, StartSide::Left);
        let html = render_screen(&matrix, SeatingMode::Single, &labels());
        assert!(html.contains("1 &lt;b&gt;Kim&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn page_includes_style_and_title() {
        let matrix = SeatMatrix::empty(2, 2);
        let page = render_screen_page(&matrix, SeatingMode::Single, &labels(), "3학년 2반");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains(".desk-grid"));
        assert!(page.contains("<h1>3학년 2반</h1>"));
    }
}
