use super::*;

fn sample() -> RouteInfo {
    RouteInfo {
        profit_rate: 1.0,
        risk: 0.1,
        capital: 1_000.0,
        transport_time: 125.0,
        gross_profit: 500.0,
        net_profit: 300.0,
    }
}

#[test]
fn derive_formats_each_figure() {
    let figures = InfoFigures::derive(&sample());
    assert_eq!(figures.profit_per_hour, "3,600");
    assert_eq!(figures.risk_percent, "10.00%");
    assert_eq!(figures.risk_cost, "100");
    assert_eq!(figures.capital, "1,000");
    assert_eq!(figures.transport_time, "2m 5s");
    assert_eq!(figures.gross_profit, "500");
    assert_eq!(figures.net_profit, "300");
}

#[test]
fn lines_follow_display_order() {
    assert_eq!(
        InfoFigures::derive(&sample()).lines(),
        vec![
            "Profit rate: 3,600 ISK/h",
            "Risk: 10.00% (100 ISK)",
            "Capital: 1,000 ISK",
            "Transport time: 2m 5s",
            "Gross profit: 500 ISK",
            "Net profit: 300 ISK",
        ]
    );
}

#[test]
fn negative_and_fractional_figures_round_and_group() {
    let info = RouteInfo { profit_rate: 0.4, net_profit: -12_345.5, ..sample() };
    let figures = InfoFigures::derive(&info);
    assert_eq!(figures.profit_per_hour, "1,440");
    assert_eq!(figures.net_profit, "-12,346");
}
