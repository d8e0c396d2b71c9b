//! Rendering of plans and solutions for the terminal.
//!
//! Renderers write to any [`Write`] so the same code serves stdout and tests.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use antfarm_lib::{Farm, PlanSummary, Result, RouteView, SolutionSummary};

use crate::terminal::{format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Sectioned, human-readable report.
    #[default]
    Text,
    /// Bare move lines, one per turn.
    Moves,
    /// Pretty-printed JSON.
    Json,
}

/// Shape of a farm reported by the `check` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmReport {
    pub ants: usize,
    pub rooms: usize,
    pub tunnels: usize,
    pub start: String,
    pub end: String,
    pub start_degree: usize,
}

impl FarmReport {
    pub fn new(farm: &Farm) -> Self {
        let graph = &farm.graph;
        Self {
            ants: farm.ants,
            rooms: graph.room_count(),
            tunnels: graph.tunnel_count(),
            start: graph.room_name(graph.start()).to_string(),
            end: graph.room_name(graph.end()).to_string(),
            start_degree: graph.degree(graph.start()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Terminal renderer bound to a palette and a route separator.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub palette: ColorPalette,
    pub arrow: &'static str,
}

impl Renderer {
    pub fn new(palette: ColorPalette, arrow: &'static str) -> Self {
        Self { palette, arrow }
    }

    /// Renderer without colors and with an ASCII arrow.
    pub fn plain() -> Self {
        Self::new(ColorPalette::plain(), " -> ")
    }

    pub fn render_check(
        &self,
        out: &mut impl Write,
        report: &FarmReport,
        format: OutputFormat,
    ) -> Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
            OutputFormat::Text | OutputFormat::Moves => {
                let p = &self.palette;
                writeln!(
                    out,
                    "Farm OK: {} ants, {} rooms, {} tunnels",
                    format_with_separators(report.ants),
                    format_with_separators(report.rooms),
                    format_with_separators(report.tunnels),
                )?;
                writeln!(
                    out,
                    "start {}{}{} ({} tunnels), end {}{}{}",
                    p.white_bold,
                    report.start,
                    p.reset,
                    report.start_degree,
                    p.white_bold,
                    report.end,
                    p.reset,
                )?;
            }
        }
        Ok(())
    }

    pub fn render_plan(
        &self,
        out: &mut impl Write,
        plan: &PlanSummary,
        format: OutputFormat,
    ) -> Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", plan.to_json()?)?,
            OutputFormat::Moves => {
                for route in &plan.routes {
                    writeln!(out, "{}", route.rooms.join(" "))?;
                }
            }
            OutputFormat::Text => self.write_routes(out, plan)?,
        }
        Ok(())
    }

    pub fn render_solution(
        &self,
        out: &mut impl Write,
        summary: &SolutionSummary,
        format: OutputFormat,
    ) -> Result<()> {
        match format {
            OutputFormat::Json => writeln!(out, "{}", summary.to_json()?)?,
            OutputFormat::Moves => writeln!(out, "{}", summary.moves_text())?,
            OutputFormat::Text => {
                self.write_routes(out, &summary.plan)?;
                self.write_assignment(out, &summary.plan.routes)?;
                writeln!(out, "\n{}", self.palette.heading("Moves"))?;
                writeln!(out, "{}", summary.moves_text())?;
                self.write_stats(out, summary)?;
            }
        }
        Ok(())
    }

    fn write_routes(&self, out: &mut impl Write, plan: &PlanSummary) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "{}", p.heading("Candidate routes"))?;
        if plan.candidates.is_empty() {
            writeln!(out, "  {}none{}", p.gray, p.reset)?;
        }
        for route in &plan.candidates {
            self.write_route_line(out, route)?;
        }

        writeln!(out, "\n{}", p.heading("Selected routes"))?;
        for route in &plan.routes {
            self.write_route_line(out, route)?;
        }
        if !plan.skipped.is_empty() {
            writeln!(
                out,
                "  {}no disjoint route through: {}{}",
                p.yellow,
                plan.skipped.join(", "),
                p.reset
            )?;
        }
        Ok(())
    }

    fn write_route_line(&self, out: &mut impl Write, route: &RouteView) -> io::Result<()> {
        let p = &self.palette;
        writeln!(
            out,
            "  {:>2}. {} {}({} {}){}",
            route.index,
            route.rooms.join(self.arrow),
            p.gray,
            route.hops,
            if route.hops == 1 { "hop" } else { "hops" },
            p.reset
        )
    }

    fn write_assignment(&self, out: &mut impl Write, routes: &[RouteView]) -> io::Result<()> {
        let p = &self.palette;
        writeln!(out, "\n{}", p.heading("Ant assignment"))?;
        for route in routes {
            match (route.ants, route.finish_turn) {
                (Some(ants), Some(finish)) if ants > 0 => writeln!(
                    out,
                    "  route {}: {} ants, last arrival on turn {}",
                    route.index,
                    format_with_separators(ants),
                    finish
                )?,
                _ => writeln!(out, "  route {}: {}idle{}", route.index, p.gray, p.reset)?,
            }
        }
        Ok(())
    }

    fn write_stats(&self, out: &mut impl Write, summary: &SolutionSummary) -> io::Result<()> {
        let p = &self.palette;
        let stats = &summary.stats;
        let color = if stats.total_turns == stats.lower_bound {
            p.green
        } else {
            p.yellow
        };

        writeln!(out, "\n{}", p.heading("Summary"))?;
        writeln!(
            out,
            "  ants:         {}",
            format_with_separators(summary.plan.ants)
        )?;
        writeln!(
            out,
            "  turns:        {color}{}{}",
            stats.total_turns,
            p.reset
        )?;
        writeln!(out, "  lower bound:  {}", stats.lower_bound)?;
        writeln!(
            out,
            "  efficiency:   {color}{:.1}%{}",
            stats.efficiency * 100.0,
            p.reset
        )?;
        writeln!(
            out,
            "  routes used:  {} of {}",
            stats.routes_used,
            summary.plan.routes.len()
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ColorPalette::detect(), crate::terminal::route_arrow())
    }
}
