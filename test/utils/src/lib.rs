pub fn chart_fixture() -> &'static str {
    return r#"
{
  "labels": ["Jan", "Feb", "Mar"],
  "datasets": [
    {
      "label": "Sales 2023",
      "data": [65, 59, 80],
      "backgroundColor": "rgba(54, 162, 235, 0.2)",
      "borderColor": "rgb(54, 162, 235)",
      "borderWidth": 1
    },
    {
      "label": "Sales 2024",
      "data": [28, 48.5, 40]
    }
  ]
}
"#
    .trim();
}

pub fn image_url_fixture() -> &'static str {
    return "https://images.unsplash.com/photo-1488590528505-98d2b5aba04b?w=600&q=80";
}
