//! User-visible strings on the chart.

use clap::ValueEnum;

use crate::assign::Arrangement;
use crate::geometry::Viewpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Language {
    #[default]
    #[value(name = "ko")]
    Korean,
    #[value(name = "en")]
    English,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartLabels {
    pub podium: String,
    pub empty_seat: String,
    pub instructor_title: String,
    pub student_title: String,
    language: Language,
}

impl ChartLabels {
    pub fn new(language: Language, arrangement: &Arrangement) -> Self {
        let ordered = matches!(arrangement, Arrangement::Ordered { .. });
        let (instructor_title, student_title) = match (language, ordered) {
            (Language::Korean, false) => ("교사용 좌석 배치표", "학생용 좌석 배치표"),
            (Language::Korean, true) => ("교사용 번호순 좌석 배치표", "학생용 번호순 좌석 배치표"),
            (Language::English, false) => ("Seating Chart (Instructor)", "Seating Chart (Student)"),
            (Language::English, true) => (
                "Seating Chart by Number (Instructor)",
                "Seating Chart by Number (Student)",
            ),
        };
        let (podium, empty_seat) = match language {
            Language::Korean => ("교탁", "빈 자리"),
            Language::English => ("Podium", "Empty"),
        };
        Self {
            podium: podium.to_string(),
            empty_seat: empty_seat.to_string(),
            instructor_title: instructor_title.to_string(),
            student_title: student_title.to_string(),
            language,
        }
    }

    /// Replaces both page titles with `title` followed by the audience tag.
    pub fn with_title(mut self, title: &str) -> Self {
        let (instructor, student) = match self.language {
            Language::Korean => ("교사용", "학생용"),
            Language::English => ("Instructor", "Student"),
        };
        self.instructor_title = format!("{title} ({instructor})");
        self.student_title = format!("{title} ({student})");
        self
    }

    pub fn title(&self, viewpoint: Viewpoint) -> &str {
        match viewpoint {
            Viewpoint::Instructor => &self.instructor_title,
            Viewpoint::Student => &self.student_title,
        }
    }
}
