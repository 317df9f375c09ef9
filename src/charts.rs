use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::record::{LeagueTable, TeamRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartSlot {
    PointsGoalDiff,
    Offense,
    Defense,
    GoalDiff,
    TopScorers,
}

pub const CHART_SLOTS: [ChartSlot; 5] = [
    ChartSlot::PointsGoalDiff,
    ChartSlot::Offense,
    ChartSlot::Defense,
    ChartSlot::GoalDiff,
    ChartSlot::TopScorers,
];

impl ChartSlot {
    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::PointsGoalDiff => "points-goal-diff-graph",
            ChartSlot::Offense => "offense-graph",
            ChartSlot::Defense => "defense-graph",
            ChartSlot::GoalDiff => "goal-diff-graph",
            ChartSlot::TopScorers => "top-scorer-graph",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Scatter,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDirection {
    Ascending,
    Reversed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Team,
    Pos,
    GoalsFor,
    GoalsAgainst,
    GoalDiff,
    Points,
    TopScorer,
    TopScorerGoals,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Team => "team",
            Field::Pos => "pos",
            Field::GoalsFor => "goals_for",
            Field::GoalsAgainst => "goals_against",
            Field::GoalDiff => "goal_diff",
            Field::Points => "points",
            Field::TopScorer => "top_scorer",
            Field::TopScorerGoals => "top_scorer_goals",
        }
    }

    pub fn value(self, row: &TeamRow) -> Cell {
        let r = &row.record;
        match self {
            Field::Team => Cell::Text(r.team.clone()),
            Field::TopScorer => Cell::Text(r.top_scorer.clone()),
            Field::Pos => Cell::Int(r.pos),
            Field::GoalsFor => Cell::Int(r.goals_for),
            Field::GoalsAgainst => Cell::Int(r.goals_against),
            Field::GoalDiff => Cell::Int(r.goal_diff),
            Field::Points => Cell::Int(r.points),
            Field::TopScorerGoals => Cell::Int(row.top_scorer_goals()),
        }
    }

    fn int(self, row: &TeamRow) -> i64 {
        match self.value(row) {
            Cell::Int(v) => v,
            Cell::Text(_) => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Int(i64),
    Text(String),
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: Cell,
    pub y: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hover: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub slot: ChartSlot,
    pub kind: ChartKind,
    pub title: String,
    pub x: Field,
    pub y: Field,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Field>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hover: Vec<Field>,
    pub labels: BTreeMap<String, String>,
    pub y_axis: AxisDirection,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn axis_label(&self, field: Field) -> String {
        self.labels
            .get(field.key())
            .cloned()
            .unwrap_or_else(|| field.key().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSet {
    pub league: String,
    pub charts: Vec<ChartSpec>,
}

impl ChartSet {
    pub fn get(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        self.charts.iter().find(|c| c.slot == slot)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarOrder {
    /// Standings row order.
    #[default]
    Table,
    /// Descending by value; ties keep standings order.
    Value,
}

impl BarOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "table" | "source" => Some(BarOrder::Table),
            "value" | "desc" => Some(BarOrder::Value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChartOptions {
    pub bar_order: BarOrder,
}

pub fn build_charts(table: &LeagueTable, options: ChartOptions) -> ChartSet {
    let league = table.league.label();
    let charts = CHART_SLOTS
        .iter()
        .map(|slot| match slot {
            ChartSlot::PointsGoalDiff => scatter_chart(table),
            ChartSlot::Offense => team_bar(
                table,
                *slot,
                Field::GoalsFor,
                format!("{league} Attack"),
                "Goals For",
                options,
            ),
            ChartSlot::Defense => team_bar(
                table,
                *slot,
                Field::GoalsAgainst,
                format!("{league} Defense"),
                "Goals Against",
                options,
            ),
            ChartSlot::GoalDiff => team_bar(
                table,
                *slot,
                Field::GoalDiff,
                format!("{league} Goal Differential"),
                "Goal Differential",
                options,
            ),
            ChartSlot::TopScorers => top_scorer_bar(table, options),
        })
        .collect();

    ChartSet {
        league: league.to_string(),
        charts,
    }
}

fn scatter_chart(table: &LeagueTable) -> ChartSpec {
    let hover = vec![Field::Team, Field::TopScorer];
    let points = table
        .rows
        .iter()
        .map(|row| point(row, Field::GoalDiff, Field::Points, Some(Field::Team), &hover))
        .collect();

    ChartSpec {
        slot: ChartSlot::PointsGoalDiff,
        kind: ChartKind::Scatter,
        title: table.league.label().to_string(),
        x: Field::GoalDiff,
        y: Field::Points,
        text: Some(Field::Team),
        hover,
        labels: labels(&[
            (Field::GoalDiff, "Goal Differential"),
            (Field::Points, "Points"),
        ]),
        y_axis: AxisDirection::Reversed,
        points,
    }
}

fn team_bar(
    table: &LeagueTable,
    slot: ChartSlot,
    y: Field,
    title: String,
    y_label: &str,
    options: ChartOptions,
) -> ChartSpec {
    let points = ordered_rows(table, y, options.bar_order)
        .into_iter()
        .map(|row| point(row, Field::Team, y, None, &[]))
        .collect();

    ChartSpec {
        slot,
        kind: ChartKind::Bar,
        title,
        x: Field::Team,
        y,
        text: None,
        hover: Vec::new(),
        labels: labels(&[(Field::Team, ""), (y, y_label)]),
        y_axis: AxisDirection::Ascending,
        points,
    }
}

fn top_scorer_bar(table: &LeagueTable, options: ChartOptions) -> ChartSpec {
    let hover = vec![Field::Team, Field::TopScorer];
    let points = ordered_rows(table, Field::TopScorerGoals, options.bar_order)
        .into_iter()
        .map(|row| point(row, Field::TopScorer, Field::TopScorerGoals, None, &hover))
        .collect();

    ChartSpec {
        slot: ChartSlot::TopScorers,
        kind: ChartKind::Bar,
        title: format!("{} Top Scorers", table.league.label()),
        x: Field::TopScorer,
        y: Field::TopScorerGoals,
        text: None,
        hover,
        labels: BTreeMap::new(),
        y_axis: AxisDirection::Ascending,
        points,
    }
}

fn ordered_rows(table: &LeagueTable, y: Field, order: BarOrder) -> Vec<&TeamRow> {
    let mut rows: Vec<&TeamRow> = table.rows.iter().collect();
    if order == BarOrder::Value {
        // Stable sort keeps standings order among ties.
        rows.sort_by_key(|row| std::cmp::Reverse(y.int(row)));
    }
    rows
}

fn point(row: &TeamRow, x: Field, y: Field, text: Option<Field>, hover: &[Field]) -> ChartPoint {
    ChartPoint {
        x: x.value(row),
        y: y.int(row),
        text: text.map(|f| f.value(row).to_string()),
        hover: hover
            .iter()
            .map(|f| (f.key().to_string(), f.value(row).to_string()))
            .collect(),
    }
}

fn labels(pairs: &[(Field, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(field, label)| (field.key().to_string(), label.to_string()))
        .collect()
}
