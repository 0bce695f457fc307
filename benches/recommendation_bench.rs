use criterion::{black_box, criterion_group, criterion_main, Criterion};
use moodrec::*;
use uuid::Uuid;
use chrono::{Duration, Utc};

fn sample_interactions(count: usize) -> Vec<Interaction> {
    let user_id = Uuid::new_v4();
    let now = Utc::now();
    let categories = [Category::Food, Category::Activity, Category::Entertainment, Category::Event];
    let moods = [Mood::Happy, Mood::Relaxed, Mood::Bored];

    (0..count)
        .map(|i| {
            let kind = if i % 3 == 0 { InteractionType::Click } else { InteractionType::View };
            Interaction::new(
                user_id,
                kind,
                categories[i % categories.len()],
                format!("Item {}", i % 40),
                moods[i % moods.len()],
            )
            .recorded_at(now - Duration::hours(i as i64))
        })
        .collect()
}

fn benchmark_preference_analysis(c: &mut Criterion) {
    let analyzer = PreferenceAnalyzer::default();
    let interactions = sample_interactions(5_000);
    let preferences: Vec<ExplicitPreference> = (0..50)
        .map(|i| ExplicitPreference::new(Uuid::new_v4(), Mood::Happy, Category::Food, format!("Dish {}", i % 7)))
        .collect();

    c.bench_function("weighted_recency_analyze", |b| {
        b.iter(|| {
            let input = AnalysisInput::new(&interactions, &preferences, Mood::Happy);
            black_box(analyzer.analyze(StrategyKind::WeightedRecency, &input));
        });
    });

    c.bench_function("flat_count_analyze", |b| {
        b.iter(|| {
            let input = AnalysisInput::new(&interactions, &preferences, Mood::Happy);
            black_box(analyzer.analyze(StrategyKind::FlatCount, &input));
        });
    });
}

fn benchmark_parsing(c: &mut Criterion) {
    let json = r#"{"food":"Ramen at **Ippudo**, 1.2 miles away","activity":"Bouldering gym","entertainment":"Improv show, 3 km away"}"#;
    let text = r#"**Food:** "Tacos at **La Casita**, 2 miles away.." **Activity:** "Sunset kayak , just." **Entertainment:** "Jazz at [Blue Note](https://bluenote.example)""#;

    c.bench_function("parse_json_response", |b| {
        b.iter(|| black_box(parse_recommendation_response(black_box(json)).unwrap()));
    });

    c.bench_function("parse_text_response", |b| {
        b.iter(|| black_box(parse_recommendation_response(black_box(text)).unwrap()));
    });

    c.bench_function("extract_recommendation_details", |b| {
        b.iter(|| {
            black_box(extract_recommendation_details(black_box(
                r#""Pasta Primavera" at **Bella Italia**. A tasty dish. [Menu](https://bella.example/menu)"#,
            )))
        });
    });
}

criterion_group!(benches, benchmark_preference_analysis, benchmark_parsing);
criterion_main!(benches);
