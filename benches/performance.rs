use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dashtop::formatting::{truncate_to_width, weather_description};
use dashtop::widgets::todo::TodoWidget;
use dashtop::widgets::{Widget, WidgetConfig};

/// Create a to-do widget with a realistic number of tasks
fn create_loaded_todo() -> TodoWidget {
    let config = WidgetConfig {
        tasks: (0..50)
            .map(|i| format!("Task number {} with a reasonably long label", i))
            .collect(),
        ..Default::default()
    };
    TodoWidget::new(config)
}

fn bench_todo_view_rebuild(c: &mut Criterion) {
    c.bench_function("todo_view_rebuild_50_tasks", |b| {
        let mut widget = create_loaded_todo();
        let ids: Vec<i64> = widget.tasks().iter().map(|t| t.id).collect();
        b.iter(|| {
            // Toggling re-renders the whole list
            for id in &ids {
                widget.toggle_task(*id, true);
            }
            black_box(widget.frame().content_text());
        });
    });
}

fn bench_truncate_to_width(c: &mut Criterion) {
    let titles: Vec<String> = (0..100)
        .map(|i| format!("Headline {} about something moderately interesting", i))
        .collect();
    c.bench_function("truncate_100_titles", |b| {
        b.iter(|| {
            for title in &titles {
                black_box(truncate_to_width(title, 46));
            }
        });
    });
}

fn bench_weather_code_lookup(c: &mut Criterion) {
    c.bench_function("weather_code_lookup", |b| {
        b.iter(|| {
            for code in 0u8..=99 {
                black_box(weather_description(code));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_todo_view_rebuild,
    bench_truncate_to_width,
    bench_weather_code_lookup
);
criterion_main!(benches);
