use crate::models::{DashboardView, DateInterval};
use chrono::NaiveDate;

pub fn render_index(view: &DashboardView, bounds: Option<DateInterval>) -> String {
    let min = bounds.map(|b| date_value(b.start())).unwrap_or_default();
    let max = bounds.map(|b| date_value(b.end())).unwrap_or_default();
    // Keep `</script>` sequences out of the embedded payload.
    let payload = serde_json::to_string(view)
        .unwrap_or_else(|_| "null".into())
        .replace("</", "<\\/");

    INDEX_HTML
        .replace("{{MIN}}", &min)
        .replace("{{MAX}}", &max)
        .replace("{{START}}", &date_value(view.interval.start()))
        .replace("{{END}}", &date_value(view.interval.end()))
        .replace("{{TOTAL}}", &view.totals.total.to_string())
        .replace("{{REGISTERED}}", &view.totals.registered.to_string())
        .replace("{{CASUAL}}", &view.totals.casual.to_string())
        .replace("{{REGISTERED_PCT}}", &format!("{:.1}", view.user_share.registered_pct))
        .replace("{{CASUAL_PCT}}", &format!("{:.1}", view.user_share.casual_pct))
        .replace("{{YEARLY_ROWS}}", &yearly_rows(view))
        .replace("{{MONTHLY_ROWS}}", &monthly_rows(view))
        .replace("{{WEATHER_ROWS}}", &weather_rows(view))
        .replace("{{DAILY_ROWS}}", &daily_rows(view))
        .replace("{{PAYLOAD}}", &payload)
}

// Open-ended interval ends have no date-input representation.
fn date_value(date: NaiveDate) -> String {
    if date == NaiveDate::MIN || date == NaiveDate::MAX {
        String::new()
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

fn yearly_rows(view: &DashboardView) -> String {
    view.yearly
        .iter()
        .map(|entry| format!("<tr><td>{}</td><td>{}</td></tr>", entry.year, entry.total))
        .collect()
}

fn monthly_rows(view: &DashboardView) -> String {
    view.monthly
        .iter()
        .map(|entry| format!("<tr><td>{}</td><td>{}</td></tr>", entry.month, entry.total))
        .collect()
}

fn weather_rows(view: &DashboardView) -> String {
    view.weather
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>{}</td><td>{:.1}</td></tr>",
                entry.weather.label(),
                entry.mean_total
            )
        })
        .collect()
}

fn daily_rows(view: &DashboardView) -> String {
    view.daily
        .iter()
        .map(|point| format!("<tr><td>{}</td><td>{}</td></tr>", point.date, point.total))
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Bike Sharing Dashboard</title>
  <style>
    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      font-family: "Trebuchet MS", sans-serif;
      color: #2b2a28;
      background: #f8f6f1;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 28px;
    }

    h1 {
      margin: 0;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 12px;
      padding: 16px;
      display: grid;
      gap: 6px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .tables {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
    }

    th, td {
      text-align: left;
      padding: 6px 10px;
      border-bottom: 1px solid #ece8df;
    }

    .daily {
      max-height: 360px;
      overflow-y: auto;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Bike Sharing Dashboard</h1>
    </header>

    <form method="get" action="/">
      <label>Start <input type="date" name="start" value="{{START}}" min="{{MIN}}" max="{{MAX}}" /></label>
      <label>End <input type="date" name="end" value="{{END}}" min="{{MIN}}" max="{{MAX}}" /></label>
      <button type="submit">Apply</button>
    </form>

    <section class="panel">
      <div class="stat"><span class="label">Total rentals</span><span class="value" id="total">{{TOTAL}}</span></div>
      <div class="stat"><span class="label">Registered users</span><span class="value" id="registered">{{REGISTERED}}</span></div>
      <div class="stat"><span class="label">Casual users</span><span class="value" id="casual">{{CASUAL}}</span></div>
      <div class="stat"><span class="label">Registered / casual</span><span class="value">{{REGISTERED_PCT}}% / {{CASUAL_PCT}}%</span></div>
    </section>

    <section class="tables">
      <table>
        <thead><tr><th>Year</th><th>Rentals</th></tr></thead>
        <tbody>{{YEARLY_ROWS}}</tbody>
      </table>
      <table>
        <thead><tr><th>Month</th><th>Rentals</th></tr></thead>
        <tbody>{{MONTHLY_ROWS}}</tbody>
      </table>
      <table>
        <thead><tr><th>Weather</th><th>Mean daily rentals</th></tr></thead>
        <tbody>{{WEATHER_ROWS}}</tbody>
      </table>
    </section>

    <section class="daily">
      <table>
        <thead><tr><th>Date</th><th>Rentals</th></tr></thead>
        <tbody>{{DAILY_ROWS}}</tbody>
      </table>
    </section>
  </main>

  <script id="dashboard-data" type="application/json">{{PAYLOAD}}</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyRecord, Dataset, WeatherSituation};
    use crate::stats::build_dashboard;

    #[test]
    fn index_shows_totals_and_breakdowns() {
        let date = NaiveDate::from_ymd_opt(2011, 1, 1).unwrap();
        let dataset = Dataset::new(
            vec![DailyRecord {
                date,
                total_count: 10,
                registered_count: 7,
                casual_count: 3,
                weather_situation: WeatherSituation::Clear,
            }],
            vec![],
        );
        let view = build_dashboard(&dataset, DateInterval::single_day(date));
        let html = render_index(&view, dataset.bounds());

        assert!(html.contains(r#"id="total">10<"#));
        assert!(html.contains(r#"id="registered">7<"#));
        assert!(html.contains("70.0% / 30.0%"));
        assert!(html.contains("<tr><td>2011</td><td>10</td></tr>"));
        assert!(html.contains("<tr><td>Clear</td><td>10.0</td></tr>"));
        assert!(html.contains(r#"min="2011-01-01""#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn empty_dataset_leaves_date_inputs_blank() {
        let dataset = Dataset::default();
        let interval = DateInterval::new(NaiveDate::MIN, NaiveDate::MAX).unwrap();
        let view = build_dashboard(&dataset, interval);
        let html = render_index(&view, dataset.bounds());

        assert!(html.contains(r#"name="start" value="" min="" max="""#));
        assert!(html.contains(r#"name="end" value="" min="" max="""#));
        assert!(!html.contains(r#"value="-262"#));
        assert!(!html.contains(r#"value="+262"#));
        assert!(html.contains(r#"id="total">0<"#));
    }
}
