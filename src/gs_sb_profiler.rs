// ============================================================================
// GS.Phy2D - Open source 2D physics engine
// 2026, Vincent Gsell
//
// This library is free software; you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public
// License as published by the Free Software Foundation; either
// version 2.1 of the License, or (at your option) any later version.
//
// This library is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License along with this library; if not, write to the Free Software
// Foundation, Inc., 51 Franklin Street, Fifth Floor, Boston, MA  02110-1301  USA
//
// Created by Vincent Gsell [https://github.com/VincentGsell]
// ============================================================================

// History
// 20261019 - Sandbox created (rapier2d + macroquad).

// =============================================================================
// gs_sb_profiler.rs - Per-frame section timings
// =============================================================================
//
// Mesure le temps passé dans des sections nommées ("Update", "Render"...)
// et garde un historique glissant des HISTORY_FRAMES dernières images.
// Affiché par l'overlay de debug (F1).
//
// =============================================================================

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Nombre d'images conservées pour les moyennes
pub const HISTORY_FRAMES: usize = 60;

struct Section {
    name: &'static str,
    current: Duration,
    history: VecDeque<Duration>,
}

impl Section {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            current: Duration::ZERO,
            history: VecDeque::with_capacity(HISTORY_FRAMES),
        }
    }
}

/// Statistiques d'une section
#[derive(Clone, Debug, PartialEq)]
pub struct SectionReport {
    pub name: &'static str,
    pub last_ms: f64,
    pub average_ms: f64,
}

pub struct Profiler {
    sections: Vec<Section>,
    frame_start: Instant,
    frame_times: VecDeque<Duration>,
}

fn push_sample(history: &mut VecDeque<Duration>, sample: Duration) {
    if history.len() == HISTORY_FRAMES {
        history.pop_front();
    }
    history.push_back(sample);
}

fn average_ms(history: &VecDeque<Duration>) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let total: Duration = history.iter().sum();
    total.as_secs_f64() * 1000.0 / history.len() as f64
}

impl Profiler {
    pub fn new() -> Self {
        Self {
            sections: Vec::new(),
            frame_start: Instant::now(),
            frame_times: VecDeque::with_capacity(HISTORY_FRAMES),
        }
    }

    /// Exécute `f` en mesurant son temps dans la section `name`
    pub fn time<T>(&mut self, name: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let result = f();
        self.record(name, start.elapsed());
        result
    }

    /// Ajoute une durée à la section pour l'image en cours
    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        self.sections[index].current += elapsed;
    }

    /// Clôture l'image : les durées en cours passent dans l'historique
    pub fn end_frame(&mut self) {
        for section in &mut self.sections {
            let sample = std::mem::take(&mut section.current);
            push_sample(&mut section.history, sample);
        }

        let now = Instant::now();
        push_sample(&mut self.frame_times, now - self.frame_start);
        self.frame_start = now;
    }

    /// Statistiques par section, dans l'ordre de première apparition
    pub fn report(&self) -> Vec<SectionReport> {
        self.sections
            .iter()
            .map(|s| SectionReport {
                name: s.name,
                last_ms: s
                    .history
                    .back()
                    .map(|d| d.as_secs_f64() * 1000.0)
                    .unwrap_or(0.0),
                average_ms: average_ms(&s.history),
            })
            .collect()
    }

    /// Temps moyen d'une image complète (ms)
    pub fn average_frame_ms(&self) -> f64 {
        average_ms(&self.frame_times)
    }

    /// Images par seconde, d'après la moyenne glissante
    pub fn fps(&self) -> f64 {
        let ms = self.average_frame_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests unitaires
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_accumulate_within_a_frame() {
        let mut profiler = Profiler::new();
        profiler.record("Update", Duration::from_millis(2));
        profiler.record("Update", Duration::from_millis(3));
        profiler.record("Render", Duration::from_millis(4));
        profiler.end_frame();

        let report = profiler.report();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].name, "Update");
        assert!((report[0].last_ms - 5.0).abs() < 1e-9);
        assert_eq!(report[1].name, "Render");
        assert!((report[1].last_ms - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_over_history() {
        let mut profiler = Profiler::new();
        for ms in [2, 4, 6] {
            profiler.record("Update", Duration::from_millis(ms));
            profiler.end_frame();
        }

        let report = profiler.report();
        assert!((report[0].average_ms - 4.0).abs() < 1e-9);
        assert!((report[0].last_ms - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut profiler = Profiler::new();
        profiler.record("Update", Duration::from_millis(100));
        profiler.end_frame();
        for _ in 0..HISTORY_FRAMES {
            profiler.record("Update", Duration::from_millis(1));
            profiler.end_frame();
        }

        // La première image (100 ms) est sortie de l'historique
        assert!((profiler.report()[0].average_ms - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_time_returns_closure_result() {
        let mut profiler = Profiler::new();
        let value = profiler.time("Work", || 21 * 2);
        assert_eq!(value, 42);
        profiler.end_frame();
        assert_eq!(profiler.report()[0].name, "Work");
    }
}
