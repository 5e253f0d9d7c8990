mod layers;
mod loss;
mod sequential;
