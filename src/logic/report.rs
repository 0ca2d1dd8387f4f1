use crate::logic::safety::SafetyAssessment;
use crate::models::{
    Block, DocumentModel, ReportKind, ReportSpec, Rgb, Section, SectionKind, Table, Text,
    TextStyle, WeatherSample, CAUTION_VERDICT, SAFE_VERDICT,
};
use chrono::{DateTime, Duration, Local};

pub const SYSTEM_NAME: &str = "Smart Fisheries Management System";
pub const SYSTEM_VERSION_LABEL: &str = "Smart Fisheries Management System v1.0";
pub const NO_ACTIVITIES: &str = "No recent activities recorded.";
pub const DISCLAIMER: &str = "This report is generated automatically based on current data \
and should be used as a guide only.";
pub const UNSAFE_WARNING: &str =
    "CURRENT CONDITIONS: Exercise extreme caution or consider postponing trip";

const SAFETY_GUIDELINES: [&str; 6] = [
    "Always check weather conditions before departure",
    "Inform harbor authorities of your fishing plans",
    "Carry proper navigation equipment (GPS, compass, charts)",
    "Maintain VHF radio contact with other vessels and shore",
    "Know emergency procedures and contact numbers",
    "Anchor safely in designated areas during rough weather",
];

const FAVORABLE_ADVICE: [&str; 3] = [
    "Current conditions are favorable for fishing activities",
    "Best fishing times: Early morning (5:00-10:00 AM) and evening (4:00-7:00 PM)",
    "Wave conditions are suitable for all vessel types",
];

const CAUTIOUS_ADVICE: [&str; 3] = [
    "Current conditions require extra caution",
    "Recommend larger, more stable vessels only",
    "Maintain constant communication with harbor authorities",
];

const GENERAL_ADVICE: [&str; 3] = [
    "Always wear appropriate safety gear and life jackets",
    "Carry emergency communication devices",
    "Ensure adequate fuel and supplies before departure",
];

// Advice thresholds, independent of the classifier.
const WINDY_KMH: f64 = 20.0;
const ROUGH_WAVE_M: f64 = 2.0;
const LOW_VISIBILITY_KM: f64 = 5.0;

/// Builds report documents from a sample and request parameters.
pub struct ReportComposer;

impl ReportComposer {
    pub fn compose(
        spec: &ReportSpec,
        sample: &WeatherSample,
        activities: &[String],
        generated_at: DateTime<Local>,
    ) -> DocumentModel {
        let assessment = sample.assess();
        let layout = spec.kind.sections();
        let title = report_title(spec);

        let mut sections = vec![header_section(&title, generated_at)];

        if layout.user_info {
            sections.push(user_section(&spec.username, generated_at));
        }
        if spec.include_weather {
            sections.push(if layout.detailed_weather {
                detailed_weather_section(sample, &spec.location)
            } else {
                weather_section(sample)
            });
            sections.push(marine_section(&assessment));
            sections.push(recommendations_section(sample, &assessment));
        }
        if layout.activities && spec.include_activities {
            sections.push(activities_section(activities));
        }
        if spec.include_safety {
            sections.push(safety_section(&assessment));
        }
        sections.push(footer_section());

        tracing::debug!(
            kind = %spec.kind,
            sections = sections.len(),
            "report composed"
        );

        DocumentModel { title, sections }
    }
}

pub fn report_title(spec: &ReportSpec) -> String {
    match spec.kind {
        ReportKind::WeatherConditions => format!("Marine Weather Report - {}", spec.location),
        ReportKind::Comprehensive => format!("{} - Comprehensive Report", SYSTEM_NAME),
        ReportKind::SafetyAssessment => format!("{} - Safety Assessment Report", SYSTEM_NAME),
        ReportKind::DailyActivity => format!("{} - Daily Activity Summary", SYSTEM_NAME),
    }
}

/// File name for a report, without directory.
pub fn report_file_name(spec: &ReportSpec, at: DateTime<Local>, extension: &str) -> String {
    let stamp = at.format("%Y%m%d_%H%M%S");
    match spec.kind {
        ReportKind::WeatherConditions => format!(
            "Weather_Report_{}_{}.{}",
            spec.location.replace(' ', "_"),
            stamp,
            extension
        ),
        _ => format!("Fisheries_Report_{}.{}", stamp, extension),
    }
}

/// Recent activity entries used when the caller has none of its own.
pub fn default_activities(now: DateTime<Local>) -> Vec<String> {
    let an_hour_ago = now - Duration::hours(1);
    vec![
        format!("Weather data updated at {}", an_hour_ago.format("%H:%M")),
        "Safety assessment completed".to_string(),
        "Marine conditions checked".to_string(),
        "User logged into system".to_string(),
        "Location coordinates updated".to_string(),
    ]
}

fn header_section(title: &str, at: DateTime<Local>) -> Section {
    Section::new(SectionKind::Header, None)
        .push(Block::Paragraph(Text::new(title, TextStyle::title())))
        .push(Block::Paragraph(Text::new(
            format!("Generated on: {}", at.format("%B %d, %Y at %H:%M")),
            TextStyle::small(),
        )))
}

fn user_section(username: &str, at: DateTime<Local>) -> Section {
    let table = Table::new(vec![1.0, 2.0])
        .row(["Username:", username])
        .row([
            "Report Generated:".to_string(),
            at.format("%B %d, %Y at %H:%M:%S").to_string(),
        ])
        .row(["System:", SYSTEM_VERSION_LABEL]);

    Section::new(SectionKind::UserInfo, Some("User Information")).push(Block::Table(table))
}

fn weather_section(sample: &WeatherSample) -> Section {
    let table = Table::new(vec![1.0, 1.0, 1.0, 1.0])
        .with_header(&["Condition", "Temperature", "Wave Height", "Wind Speed"])
        .row([
            sample.condition().to_string(),
            format!("{:.1}°C", sample.air_temperature_c()),
            format!("{:.1}m", sample.wave_height_m()),
            format!("{:.1} km/h", sample.wind_speed_kmh()),
        ]);

    Section::new(SectionKind::Weather, Some("Current Weather Conditions"))
        .push(Block::Table(table))
}

fn detailed_weather_section(sample: &WeatherSample, location: &str) -> Section {
    let table = Table::new(vec![1.0, 2.0])
        .row(["Location:", location])
        .row(["Current Condition:", sample.condition()])
        .row([
            "Temperature:".to_string(),
            format!("{:.1}°C", sample.air_temperature_c()),
        ])
        .row([
            "Sea Temperature:".to_string(),
            format!("{:.1}°C", sample.sea_temperature_c()),
        ])
        .row([
            "Wave Height:".to_string(),
            format!("{:.1}m", sample.wave_height_m()),
        ])
        .row([
            "Wind Wave Height:".to_string(),
            format!("{:.1}m", sample.wind_wave_height_m()),
        ])
        .row([
            "Wind Speed:".to_string(),
            format!("{:.1} km/h", sample.wind_speed_kmh()),
        ])
        .row([
            "Visibility:".to_string(),
            format!("{:.1} km", sample.visibility_km()),
        ])
        .row([
            "Humidity:".to_string(),
            format!("{:.0}%", sample.humidity_pct()),
        ])
        .row([
            "Pressure:".to_string(),
            format!("{:.0} hPa", sample.pressure_hpa()),
        ])
        .row(["UV Index:".to_string(), sample.uv_index().to_string()])
        .row(["Tide Status:", sample.tide().as_str()]);

    Section::new(SectionKind::Weather, Some("Detailed Weather Analysis"))
        .push(Block::Table(table))
}

fn marine_section(assessment: &SafetyAssessment) -> Section {
    let verdict = if assessment.overall_safe {
        Text::new(
            SAFE_VERDICT,
            TextStyle::bold().with_size(14.0).with_color(Rgb::ACCENT),
        )
    } else {
        Text::new(
            CAUTION_VERDICT,
            TextStyle::bold().with_size(14.0).with_color(Rgb::DANGER),
        )
    };

    let table = Table::new(vec![1.0, 1.0, 2.0])
        .with_header(&["Parameter", "Status", "Recommendation"])
        .row([
            "Wave Conditions",
            assessment.wave.as_str(),
            assessment.wave.recommendation(),
        ])
        .row([
            "Wind Conditions",
            assessment.wind.as_str(),
            assessment.wind.recommendation(),
        ])
        .row([
            "Visibility",
            assessment.visibility.as_str(),
            assessment.visibility.recommendation(),
        ]);

    Section::new(
        SectionKind::MarineAssessment,
        Some("Marine Conditions Assessment"),
    )
    .push(Block::Paragraph(verdict))
    .push(Block::Table(table))
}

fn recommendations_section(sample: &WeatherSample, assessment: &SafetyAssessment) -> Section {
    let mut items: Vec<Text> = if assessment.overall_safe {
        FAVORABLE_ADVICE.iter().map(|s| Text::plain(*s)).collect()
    } else {
        CAUTIOUS_ADVICE.iter().map(|s| Text::plain(*s)).collect()
    };

    if sample.wind_speed_kmh() > WINDY_KMH {
        items.push(Text::plain(
            "High winds detected - secure all equipment properly",
        ));
    }
    if sample.wave_height_m() > ROUGH_WAVE_M {
        items.push(Text::plain("High waves - avoid shallow water areas"));
    }
    if sample.visibility_km() < LOW_VISIBILITY_KM {
        items.push(Text::plain(
            "Limited visibility - use radar and GPS navigation",
        ));
    }

    items.extend(GENERAL_ADVICE.iter().map(|s| Text::plain(*s)));

    Section::new(SectionKind::Recommendations, Some("Fishing Recommendations"))
        .push(Block::List(items))
}

fn activities_section(activities: &[String]) -> Section {
    let section = Section::new(SectionKind::Activities, Some("Recent System Activities"));
    if activities.is_empty() {
        section.push(Block::Paragraph(Text::new(
            NO_ACTIVITIES,
            TextStyle::placeholder(),
        )))
    } else {
        section.push(Block::List(
            activities.iter().map(|a| Text::plain(a.as_str())).collect(),
        ))
    }
}

fn safety_section(assessment: &SafetyAssessment) -> Section {
    let mut items: Vec<Text> = SAFETY_GUIDELINES.iter().map(|s| Text::plain(*s)).collect();
    if !assessment.overall_safe {
        items.push(Text::new(
            UNSAFE_WARNING,
            TextStyle::bold().with_color(Rgb::DANGER),
        ));
    }
    Section::new(SectionKind::SafetyGuidelines, Some("Safety Guidelines")).push(Block::List(items))
}

fn footer_section() -> Section {
    Section::new(SectionKind::Footer, None)
        .push(Block::Paragraph(Text::new(
            SYSTEM_NAME,
            TextStyle {
                bold: true,
                ..TextStyle::small()
            },
        )))
        .push(Block::Paragraph(Text::new(
            DISCLAIMER,
            TextStyle {
                italic: true,
                ..TextStyle::small().with_size(8.0)
            },
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 14, 9, 5, 7).unwrap()
    }

    fn spec(kind: ReportKind) -> ReportSpec {
        ReportSpec::new(kind, "/tmp/reports")
            .with_username("kamal")
            .with_location("Negombo, Sri Lanka")
    }

    fn activities() -> Vec<String> {
        vec!["Checked nets".to_string(), "Logged catch".to_string()]
    }

    #[test]
    fn comprehensive_report_section_order() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::Comprehensive),
            &WeatherSample::default(),
            &activities(),
            at(),
        );
        assert_eq!(
            doc.section_kinds(),
            vec![
                SectionKind::Header,
                SectionKind::UserInfo,
                SectionKind::Weather,
                SectionKind::MarineAssessment,
                SectionKind::Recommendations,
                SectionKind::Activities,
                SectionKind::SafetyGuidelines,
                SectionKind::Footer,
            ]
        );
        assert_eq!(
            doc.title,
            "Smart Fisheries Management System - Comprehensive Report"
        );
    }

    #[test]
    fn header_carries_generation_time() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::Comprehensive),
            &WeatherSample::default(),
            &[],
            at(),
        );
        let header = doc.section(SectionKind::Header).unwrap();
        let lines: Vec<_> = header.paragraphs().map(|p| p.content.as_str()).collect();
        assert_eq!(lines[1], "Generated on: March 14, 2026 at 09:05");
    }

    #[test]
    fn weather_report_omits_user_and_activities() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::WeatherConditions),
            &WeatherSample::default(),
            &activities(),
            at(),
        );
        assert!(!doc.has_section(SectionKind::UserInfo));
        assert!(!doc.has_section(SectionKind::Activities));
        assert_eq!(doc.title, "Marine Weather Report - Negombo, Sri Lanka");

        let weather = doc.section(SectionKind::Weather).unwrap();
        assert_eq!(weather.heading.as_deref(), Some("Detailed Weather Analysis"));
        let table = weather.tables().next().unwrap();
        assert_eq!(table.rows[0], vec!["Location:", "Negombo, Sri Lanka"]);
    }

    #[test]
    fn daily_summary_carries_assessment_with_weather() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::DailyActivity),
            &WeatherSample::default(),
            &activities(),
            at(),
        );
        assert!(doc.has_section(SectionKind::MarineAssessment));
        assert!(doc.has_section(SectionKind::Recommendations));
        assert!(doc.has_section(SectionKind::Activities));
    }

    #[test]
    fn excluded_weather_drops_assessment_and_advice() {
        for kind in [
            ReportKind::Comprehensive,
            ReportKind::WeatherConditions,
            ReportKind::SafetyAssessment,
            ReportKind::DailyActivity,
        ] {
            let s = spec(kind).with_sections(false, true, true);
            let doc = ReportComposer::compose(&s, &WeatherSample::default(), &[], at());
            assert!(!doc.has_section(SectionKind::Weather));
            assert!(!doc.has_section(SectionKind::MarineAssessment));
            assert!(!doc.has_section(SectionKind::Recommendations));
            assert!(doc.has_section(SectionKind::SafetyGuidelines));
            assert_eq!(doc.marine_verdict(), None);
        }
    }

    #[test]
    fn empty_activities_use_placeholder() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::Comprehensive),
            &WeatherSample::default(),
            &[],
            at(),
        );
        let section = doc.section(SectionKind::Activities).unwrap();
        assert_eq!(section.list_items().count(), 0);
        let placeholder = section.paragraphs().next().unwrap();
        assert_eq!(placeholder.content, NO_ACTIVITIES);
        assert!(placeholder.style.italic);
    }

    #[test]
    fn unsafe_conditions_add_bold_warning() {
        let rough = WeatherSample::builder("Rough Seas")
            .wave_height_m(3.4)
            .build();
        let doc = ReportComposer::compose(&spec(ReportKind::SafetyAssessment), &rough, &[], at());
        let items: Vec<_> = doc
            .section(SectionKind::SafetyGuidelines)
            .unwrap()
            .list_items()
            .collect();
        assert_eq!(items.len(), 7);
        let last = items.last().unwrap();
        assert_eq!(last.content, UNSAFE_WARNING);
        assert!(last.style.bold);
        assert_eq!(last.style.color, Rgb::DANGER);
        assert_eq!(doc.marine_verdict(), Some(false));
    }

    #[test]
    fn safe_conditions_have_six_guidelines() {
        let doc = ReportComposer::compose(
            &spec(ReportKind::Comprehensive),
            &WeatherSample::default(),
            &[],
            at(),
        );
        let count = doc
            .section(SectionKind::SafetyGuidelines)
            .unwrap()
            .list_items()
            .count();
        assert_eq!(count, 6);
    }

    #[test]
    fn supplementary_advice_uses_own_thresholds() {
        // Wind 22 and waves 2.2 are still "safe" for the classifier
        // but cross the advice thresholds.
        let breezy = WeatherSample::builder("Windy")
            .wind_speed_kmh(22.0)
            .wave_height_m(2.2)
            .visibility_km(4.0)
            .build();
        assert!(breezy.is_safe_for_fishing());

        let doc = ReportComposer::compose(&spec(ReportKind::Comprehensive), &breezy, &[], at());
        let items: Vec<_> = doc
            .section(SectionKind::Recommendations)
            .unwrap()
            .list_items()
            .map(|t| t.content.clone())
            .collect();
        assert_eq!(items.len(), 3 + 3 + 3);
        assert_eq!(items[0], FAVORABLE_ADVICE[0]);
        assert!(items[3].starts_with("High winds"));
        assert!(items[4].starts_with("High waves"));
        assert!(items[5].starts_with("Limited visibility"));
    }

    #[test]
    fn file_names_follow_kind() {
        let fisheries = report_file_name(&spec(ReportKind::Comprehensive), at(), "pdf");
        assert_eq!(fisheries, "Fisheries_Report_20260314_090507.pdf");

        let weather = report_file_name(&spec(ReportKind::WeatherConditions), at(), "pdf");
        assert_eq!(
            weather,
            "Weather_Report_Negombo,_Sri_Lanka_20260314_090507.pdf"
        );
    }

    #[test]
    fn default_activities_reference_previous_hour() {
        let items = default_activities(at());
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], "Weather data updated at 08:05");
    }

    proptest! {
        #[test]
        fn activities_never_appear_when_excluded(
            entries in proptest::collection::vec("[a-z ]{1,20}", 0..6),
        ) {
            let s = spec(ReportKind::Comprehensive).with_sections(true, false, true);
            let doc = ReportComposer::compose(&s, &WeatherSample::default(), &entries, at());
            prop_assert!(!doc.has_section(SectionKind::Activities));
        }

        #[test]
        fn marine_verdict_round_trips(
            wave in 0.0f64..6.0,
            wind in 0.0f64..50.0,
            visibility in 0.0f64..20.0,
        ) {
            let sample = WeatherSample::builder("Any")
                .wave_height_m(wave)
                .wind_speed_kmh(wind)
                .visibility_km(visibility)
                .build();
            let doc = ReportComposer::compose(&spec(ReportKind::Comprehensive), &sample, &[], at());
            prop_assert_eq!(doc.marine_verdict(), Some(sample.is_safe_for_fishing()));
        }
    }
}
