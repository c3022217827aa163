//! Static metric table
//!
//! Declaration order is the order `list_by_category` and `list_for_platform`
//! return. Every entry names at least one native record type.

use super::MetricDefinition;
use crate::types::MetricCategory::*;
use crate::types::VisualKind::*;

const fn m(
    id: &'static str,
    display_name: &'static str,
    category: crate::types::MetricCategory,
    unit: &'static str,
    visual_kind: crate::types::VisualKind,
) -> MetricDefinition {
    MetricDefinition::new(id, display_name, category, unit, visual_kind)
}

pub(super) static METRICS: &[MetricDefinition] = &[
    // Activity
    m("steps", "Steps", Activity, "steps", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierStepCount")
        .health_connect("StepsRecord")
        .goal(10_000.0),
    m("active_calories", "Active Calories", Activity, "kcal", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierActiveEnergyBurned")
        .health_connect("ActiveCaloriesBurnedRecord")
        .goal(500.0),
    m("total_calories", "Total Calories", Activity, "kcal", BarLineOverlay)
        .health_connect("TotalCaloriesBurnedRecord"),
    m("basal_calories", "Resting Energy", Activity, "kcal", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierBasalEnergyBurned"),
    m("distance", "Walking + Running Distance", Activity, "km", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDistanceWalkingRunning")
        .health_connect("DistanceRecord"),
    m("cycling_distance", "Cycling Distance", Activity, "km", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDistanceCycling"),
    m("swimming_distance", "Swimming Distance", Activity, "m", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDistanceSwimming"),
    m("flights_climbed", "Flights Climbed", Activity, "floors", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierFlightsClimbed")
        .health_connect("FloorsClimbedRecord")
        .goal(10.0),
    m("exercise_minutes", "Exercise Minutes", Activity, "min", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierAppleExerciseTime")
        .health_connect("ExerciseSessionRecord")
        .goal(30.0),
    m("stand_hours", "Stand Hours", Activity, "hr", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierAppleStandHour")
        .goal(12.0),
    m("workouts", "Workouts", Activity, "sessions", DayEventGrid)
        .healthkit("HKWorkoutType")
        .health_connect("ExerciseSessionRecord"),
    m("swimming_strokes", "Swimming Strokes", Activity, "strokes", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierSwimmingStrokeCount"),
    m("wheelchair_pushes", "Wheelchair Pushes", Activity, "pushes", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierPushCount")
        .health_connect("WheelchairPushesRecord"),
    m("elevation_gained", "Elevation Gained", Activity, "m", ScalarBar)
        .health_connect("ElevationGainedRecord"),
    m("cycling_power", "Cycling Power", Activity, "W", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierCyclingPower")
        .health_connect("PowerRecord"),
    m("running_power", "Running Power", Activity, "W", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRunningPower"),
    m("speed", "Speed", Activity, "km/h", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRunningSpeed")
        .health_connect("SpeedRecord"),
    m("cycling_cadence", "Cycling Cadence", Activity, "rpm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierCyclingCadence")
        .health_connect("CyclingPedalingCadenceRecord"),
    m("steps_cadence", "Steps Cadence", Activity, "steps/min", ContinuousLine)
        .health_connect("StepsCadenceRecord"),
    m("physical_effort", "Physical Effort", Activity, "METs", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierPhysicalEffort"),
    // Body
    m("weight", "Weight", Body, "kg", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierBodyMass")
        .health_connect("WeightRecord"),
    m("body_fat", "Body Fat", Body, "%", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierBodyFatPercentage")
        .health_connect("BodyFatRecord"),
    m("bmi", "Body Mass Index", Body, "kg/m²", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierBodyMassIndex"),
    m("lean_body_mass", "Lean Body Mass", Body, "kg", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierLeanBodyMass")
        .health_connect("LeanBodyMassRecord"),
    m("height", "Height", Body, "cm", SingleLatestValue)
        .healthkit("HKQuantityTypeIdentifierHeight")
        .health_connect("HeightRecord"),
    m("waist_circumference", "Waist Circumference", Body, "cm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWaistCircumference"),
    m("bone_mass", "Bone Mass", Body, "kg", ContinuousLine)
        .health_connect("BoneMassRecord"),
    m("body_water_mass", "Body Water Mass", Body, "kg", ContinuousLine)
        .health_connect("BodyWaterMassRecord"),
    m("basal_metabolic_rate", "Basal Metabolic Rate", Body, "kcal/day", SingleLatestValue)
        .health_connect("BasalMetabolicRateRecord"),
    // Heart
    m("heart_rate", "Heart Rate", Heart, "bpm", RangedLine)
        .healthkit("HKQuantityTypeIdentifierHeartRate")
        .health_connect("HeartRateRecord"),
    m("resting_heart_rate", "Resting Heart Rate", Heart, "bpm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRestingHeartRate")
        .health_connect("RestingHeartRateRecord"),
    m("walking_heart_rate", "Walking Heart Rate Average", Heart, "bpm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWalkingHeartRateAverage"),
    m("hrv", "Heart Rate Variability", Heart, "ms", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierHeartRateVariabilitySDNN")
        .health_connect("HeartRateVariabilityRmssdRecord"),
    m("vo2_max", "Cardio Fitness", Heart, "mL/kg/min", SingleLatestValue)
        .healthkit("HKQuantityTypeIdentifierVO2Max")
        .health_connect("Vo2MaxRecord"),
    m("heart_rate_recovery", "Heart Rate Recovery", Heart, "bpm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierHeartRateRecoveryOneMinute"),
    m("high_heart_rate_events", "High Heart Rate Notifications", Heart, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierHighHeartRateEvent"),
    m("low_heart_rate_events", "Low Heart Rate Notifications", Heart, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierLowHeartRateEvent"),
    m("irregular_rhythm_events", "Irregular Rhythm Notifications", Heart, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierIrregularHeartRhythmEvent"),
    m("afib_burden", "AFib History", Heart, "%", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierAtrialFibrillationBurden"),
    m("ecg", "ECG Recordings", Heart, "recordings", DayEventGrid)
        .healthkit("HKElectrocardiogramType"),
    m("perfusion_index", "Peripheral Perfusion Index", Heart, "%", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierPeripheralPerfusionIndex"),
    // Vitals
    m("blood_pressure", "Blood Pressure", Vitals, "mmHg", DualComponentLine)
        .healthkit("HKCorrelationTypeIdentifierBloodPressure")
        .health_connect("BloodPressureRecord"),
    m("oxygen_saturation", "Blood Oxygen", Vitals, "%", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierOxygenSaturation")
        .health_connect("OxygenSaturationRecord"),
    m("respiratory_rate", "Respiratory Rate", Vitals, "breaths/min", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRespiratoryRate")
        .health_connect("RespiratoryRateRecord"),
    m("body_temperature", "Body Temperature", Vitals, "°C", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierBodyTemperature")
        .health_connect("BodyTemperatureRecord"),
    m("skin_temperature", "Wrist Temperature", Vitals, "°C", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierAppleSleepingWristTemperature")
        .health_connect("SkinTemperatureRecord"),
    m("blood_glucose", "Blood Glucose", Vitals, "mg/dL", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierBloodGlucose")
        .health_connect("BloodGlucoseRecord"),
    m("electrodermal_activity", "Electrodermal Activity", Vitals, "µS", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierElectrodermalActivity"),
    m("blood_alcohol", "Blood Alcohol Content", Vitals, "%", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierBloodAlcoholContent"),
    m("forced_vital_capacity", "Forced Vital Capacity", Vitals, "L", SingleLatestValue)
        .healthkit("HKQuantityTypeIdentifierForcedVitalCapacity"),
    m("forced_expiratory_volume", "Forced Expiratory Volume, 1 sec", Vitals, "L", SingleLatestValue)
        .healthkit("HKQuantityTypeIdentifierForcedExpiratoryVolume1"),
    m("peak_expiratory_flow", "Peak Expiratory Flow Rate", Vitals, "L/min", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierPeakExpiratoryFlowRate"),
    m("inhaler_usage", "Inhaler Usage", Vitals, "puffs", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierInhalerUsage"),
    // Sleep
    m("sleep_duration", "Sleep", Sleep, "hr", SegmentedStack)
        .healthkit("HKCategoryTypeIdentifierSleepAnalysis")
        .health_connect("SleepSessionRecord")
        .goal(8.0),
    m("sleep_deep", "Deep Sleep", Sleep, "hr", SegmentedStack)
        .healthkit("HKCategoryValueSleepAnalysisAsleepDeep")
        .health_connect("SleepSessionRecord.STAGE_TYPE_DEEP"),
    m("sleep_rem", "REM Sleep", Sleep, "hr", SegmentedStack)
        .healthkit("HKCategoryValueSleepAnalysisAsleepREM")
        .health_connect("SleepSessionRecord.STAGE_TYPE_REM"),
    m("sleep_core", "Core Sleep", Sleep, "hr", SegmentedStack)
        .healthkit("HKCategoryValueSleepAnalysisAsleepCore")
        .health_connect("SleepSessionRecord.STAGE_TYPE_LIGHT"),
    m("sleep_awake", "Awake Time", Sleep, "hr", SegmentedStack)
        .healthkit("HKCategoryValueSleepAnalysisAwake")
        .health_connect("SleepSessionRecord.STAGE_TYPE_AWAKE"),
    m("time_in_bed", "Time in Bed", Sleep, "hr", ScalarBar)
        .healthkit("HKCategoryValueSleepAnalysisInBed")
        .health_connect("SleepSessionRecord"),
    m("breathing_disturbances", "Breathing Disturbances", Sleep, "events/hr", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierAppleSleepingBreathingDisturbances"),
    m("sleep_apnea_events", "Sleep Apnea Notifications", Sleep, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierSleepApneaEvent"),
    // Nutrition
    m("dietary_energy", "Calories Consumed", Nutrition, "kcal", BarLineOverlay)
        .healthkit("HKQuantityTypeIdentifierDietaryEnergyConsumed")
        .health_connect("NutritionRecord.energy")
        .goal(2_000.0),
    m("protein", "Protein", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryProtein")
        .health_connect("NutritionRecord.protein")
        .goal(50.0),
    m("carbohydrates", "Carbohydrates", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryCarbohydrates")
        .health_connect("NutritionRecord.totalCarbohydrate"),
    m("total_fat", "Total Fat", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryFatTotal")
        .health_connect("NutritionRecord.totalFat"),
    m("saturated_fat", "Saturated Fat", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryFatSaturated")
        .health_connect("NutritionRecord.saturatedFat"),
    m("fiber", "Fiber", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryFiber")
        .health_connect("NutritionRecord.dietaryFiber")
        .goal(30.0),
    m("sugar", "Sugar", Nutrition, "g", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietarySugar")
        .health_connect("NutritionRecord.sugar"),
    m("sodium", "Sodium", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietarySodium")
        .health_connect("NutritionRecord.sodium"),
    m("cholesterol", "Cholesterol", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryCholesterol")
        .health_connect("NutritionRecord.cholesterol"),
    m("potassium", "Potassium", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryPotassium")
        .health_connect("NutritionRecord.potassium"),
    m("calcium", "Calcium", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryCalcium")
        .health_connect("NutritionRecord.calcium"),
    m("iron", "Iron", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryIron")
        .health_connect("NutritionRecord.iron"),
    m("vitamin_c", "Vitamin C", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryVitaminC")
        .health_connect("NutritionRecord.vitaminC"),
    m("vitamin_d", "Vitamin D", Nutrition, "µg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryVitaminD")
        .health_connect("NutritionRecord.vitaminD"),
    m("caffeine", "Caffeine", Nutrition, "mg", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryCaffeine")
        .health_connect("NutritionRecord.caffeine"),
    m("water", "Water", Nutrition, "mL", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierDietaryWater")
        .health_connect("HydrationRecord")
        .goal(2_500.0),
    // Cycle
    m("menstrual_flow", "Menstrual Flow", Cycle, "level", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierMenstrualFlow")
        .health_connect("MenstruationFlowRecord"),
    m("menstruation_period", "Period", Cycle, "days", DayEventGrid)
        .health_connect("MenstruationPeriodRecord"),
    m("ovulation_test", "Ovulation Test", Cycle, "result", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierOvulationTestResult")
        .health_connect("OvulationTestRecord"),
    m("cervical_mucus", "Cervical Mucus Quality", Cycle, "level", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierCervicalMucusQuality")
        .health_connect("CervicalMucusRecord"),
    m("intermenstrual_bleeding", "Spotting", Cycle, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierIntermenstrualBleeding")
        .health_connect("IntermenstrualBleedingRecord"),
    m("sexual_activity", "Sexual Activity", Cycle, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierSexualActivity")
        .health_connect("SexualActivityRecord"),
    m("basal_body_temperature", "Basal Body Temperature", Cycle, "°C", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierBasalBodyTemperature")
        .health_connect("BasalBodyTemperatureRecord"),
    m("contraceptive", "Contraceptives", Cycle, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierContraceptive"),
    m("pregnancy_test", "Pregnancy Test", Cycle, "result", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierPregnancyTestResult"),
    m("progesterone_test", "Progesterone Test", Cycle, "result", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierProgesteroneTestResult"),
    m("lactation", "Lactation", Cycle, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierLactation"),
    m("pregnancy", "Pregnancy", Cycle, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierPregnancy"),
    // Wellness
    m("mindful_minutes", "Mindful Minutes", Wellness, "min", ScalarBar)
        .healthkit("HKCategoryTypeIdentifierMindfulSession")
        .health_connect("MindfulnessSessionRecord")
        .goal(10.0),
    m("mood", "State of Mind", Wellness, "valence", MoodScale)
        .healthkit("HKStateOfMindType"),
    m("handwashing", "Handwashing", Wellness, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierHandwashingEvent"),
    m("toothbrushing", "Toothbrushing", Wellness, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierToothbrushingEvent"),
    m("time_in_daylight", "Time in Daylight", Wellness, "min", ScalarBar)
        .healthkit("HKQuantityTypeIdentifierTimeInDaylight"),
    m("headache", "Headache", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierHeadache"),
    m("fatigue", "Fatigue", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierFatigue"),
    m("mood_changes", "Mood Changes", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierMoodChanges"),
    m("appetite_changes", "Appetite Changes", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierAppetiteChanges"),
    m("bloating", "Bloating", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierBloating"),
    m("dizziness", "Dizziness", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierDizziness"),
    m("lower_back_pain", "Lower Back Pain", Wellness, "severity", DayIntensityGrid)
        .healthkit("HKCategoryTypeIdentifierLowerBackPain"),
    // Mobility
    m("walking_speed", "Walking Speed", Mobility, "m/s", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWalkingSpeed"),
    m("walking_step_length", "Walking Step Length", Mobility, "cm", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWalkingStepLength"),
    m("walking_asymmetry", "Walking Asymmetry", Mobility, "%", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierWalkingAsymmetryPercentage"),
    m("double_support_time", "Double Support Time", Mobility, "%", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWalkingDoubleSupportPercentage"),
    m("stair_ascent_speed", "Stair Speed: Up", Mobility, "m/s", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierStairAscentSpeed"),
    m("stair_descent_speed", "Stair Speed: Down", Mobility, "m/s", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierStairDescentSpeed"),
    m("six_minute_walk", "Six-Minute Walk", Mobility, "m", SingleLatestValue)
        .healthkit("HKQuantityTypeIdentifierSixMinuteWalkTestDistance"),
    m("walking_steadiness", "Walking Steadiness", Mobility, "%", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierAppleWalkingSteadiness"),
    m("running_stride_length", "Running Stride Length", Mobility, "m", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRunningStrideLength"),
    m("ground_contact_time", "Ground Contact Time", Mobility, "ms", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierRunningGroundContactTime"),
    // Environment
    m("environmental_noise", "Environmental Sound Levels", Environment, "dBA", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierEnvironmentalAudioExposure"),
    m("headphone_audio", "Headphone Audio Levels", Environment, "dBA", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierHeadphoneAudioExposure"),
    m("sound_reduction", "Environmental Sound Reduction", Environment, "dBA", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierEnvironmentalSoundReduction"),
    m("noise_notifications", "Noise Notifications", Environment, "events", DayEventGrid)
        .healthkit("HKCategoryTypeIdentifierEnvironmentalAudioExposureEvent"),
    m("uv_exposure", "UV Exposure", Environment, "index", ThresholdedLine)
        .healthkit("HKQuantityTypeIdentifierUVExposure"),
    m("water_temperature", "Water Temperature", Environment, "°C", ContinuousLine)
        .healthkit("HKQuantityTypeIdentifierWaterTemperature"),
];
