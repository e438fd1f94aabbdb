//! Exercise catalog. The daily exercise cycles through five descriptors.

use super::ProgramDay;

/// A guided exercise shown for a program day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exercise {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub duration_minutes: u8,
    pub instructions: &'static [&'static str],
}

/// The rotation, in order. Day 1 gets the first entry.
pub const EXERCISES: [Exercise; 5] = [
    Exercise {
        title: "Basic Diaphragmatic Breathing",
        description: "Learn to breathe with the diaphragm, the base of every other exercise.",
        category: "Breathing",
        duration_minutes: 5,
        instructions: &[
            "Lie comfortably on your back",
            "Place one hand on your chest and the other on your belly",
            "Inhale through the nose, feeling the belly rise",
            "Exhale through the mouth, feeling the belly fall",
            "Repeat for 5 minutes, keeping a steady rhythm",
        ],
    },
    Exercise {
        title: "Transverse Activation",
        description: "Activate the deepest abdominal muscle, key to closing the diastasis.",
        category: "Activation",
        duration_minutes: 7,
        instructions: &[
            "Lie on your back with knees bent",
            "Inhale deeply through the nose",
            "As you exhale, pull the navel toward the spine",
            "Hold for 5 seconds",
            "Relax and repeat 10 times",
        ],
    },
    Exercise {
        title: "Basic Hypopressive (LPF)",
        description: "Abdominal vacuum technique that strengthens the core and narrows the waist.",
        category: "Hypopressive",
        duration_minutes: 8,
        instructions: &[
            "Stand with feet apart",
            "Breathe all the air out of your lungs",
            "Without breathing in, pull the belly in and up",
            "Hold for 10-15 seconds",
            "Inhale gently and rest",
            "Repeat 5 times",
        ],
    },
    Exercise {
        title: "Neutral Spine Posture",
        description: "Learn to hold the right posture to protect the lower back.",
        category: "Posture",
        duration_minutes: 6,
        instructions: &[
            "Stand with feet aligned under the hips",
            "Line up shoulders, hips and ankles",
            "Keep the chin parallel to the floor",
            "Gently engage the core",
            "Practice this posture throughout the day",
        ],
    },
    Exercise {
        title: "Core Stretch",
        description: "Stretch the abdominal and lower-back muscles for more flexibility.",
        category: "Stretching",
        duration_minutes: 5,
        instructions: &[
            "Lie face down",
            "Place your hands on the floor beside your chest",
            "Lift the torso gently",
            "Feel the stretch across the abdomen",
            "Hold for 30 seconds, repeat 3 times",
        ],
    },
];

/// Exercise for a day: `EXERCISES[(day - 1) % 5]`.
pub fn exercise_for_day(day: ProgramDay) -> &'static Exercise {
    let index = (day.value() as usize - 1) % EXERCISES.len();
    &EXERCISES[index]
}
